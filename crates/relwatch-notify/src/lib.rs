pub mod compose;
pub mod deliver;

pub use compose::{compose, sample, Embed, EmbedAuthor, EmbedField, EmbedFooter, WebhookPayload};
pub use deliver::{Notifier, WebhookNotifier};
