use relwatch_core::config::Footer;
use relwatch_core::detect::{Change, ChangeKind};
use relwatch_core::state::{is_known_state, release_mode_label, state_color, state_icon, state_label};
use relwatch_core::{ApplicationDescriptor, StatusRecord};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const TITLE_BOTH: &str = "🆕 New version and status update";
pub const TITLE_VERSION: &str = "🆕 New version submitted";
pub const TITLE_STATE: &str = "🔄 Status update";

pub const FIELD_STATE: &str = "Status";
pub const FIELD_VERSION: &str = "Version";
pub const FIELD_RELEASE: &str = "Release Type";
pub const FIELD_PREVIOUS: &str = "Previous Version";
pub const FIELD_SUBMITTED: &str = "Submitted";

const NOT_AVAILABLE: &str = "N/A";

// ── Payload ──

/// Envelope POSTed to the webhook.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

impl From<Embed> for WebhookPayload {
    fn from(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub author: EmbedAuthor,
    pub footer: EmbedFooter,
    pub timestamp: String,
    pub url: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline,
        }
    }
}

// ── Composition ──

/// Build the notification for a classified change.
///
/// `now` is the composition time and becomes the embed timestamp.
pub fn compose(
    app: &ApplicationDescriptor,
    footer: &Footer,
    prior: Option<&StatusRecord>,
    current: &StatusRecord,
    change: &Change,
    now: OffsetDateTime,
) -> Embed {
    let title = match change.kind() {
        ChangeKind::Both => TITLE_BOTH,
        ChangeKind::VersionOnly => TITLE_VERSION,
        ChangeKind::StateOnly => TITLE_STATE,
    };

    let mut fields = vec![
        EmbedField::new(FIELD_STATE, format_state(&current.lifecycle_state), true),
        EmbedField::new(FIELD_VERSION, current.display_version(), true),
        EmbedField::new(FIELD_RELEASE, release_mode_label(&current.release_mode), true),
    ];
    match prior {
        Some(p) if change.version_changed => {
            fields.push(EmbedField::new(FIELD_PREVIOUS, p.version_string.clone(), true));
            fields.push(submitted_field(current));
        }
        _ => fields.push(submitted_field(current)),
    }

    Embed {
        title: title.to_string(),
        color: state_color(&current.lifecycle_state).code(),
        author: EmbedAuthor {
            name: app.name.clone(),
            icon_url: app.icon_url.clone(),
        },
        footer: EmbedFooter {
            text: footer.text.clone(),
            icon_url: footer.icon_url.clone(),
        },
        timestamp: now.format(&Rfc3339).unwrap_or_default(),
        url: app.console_url(),
        fields,
    }
}

/// A notification for `notify test`, built from a placeholder record.
pub fn sample(app: &ApplicationDescriptor, footer: &Footer, now: OffsetDateTime) -> Embed {
    let record = StatusRecord::new("IN_REVIEW", "0.0.0", "MANUAL").with_build("0");
    let change = Change::classify(None, &record);
    let mut embed = compose(app, footer, None, &record, &change, now);
    embed.title = format!("🧪 relwatch test for {}", app.name);
    embed
}

/// `"{icon} {label}"`; unknown states keep the raw value for context.
fn format_state(state: &str) -> String {
    if is_known_state(state) || state.is_empty() {
        format!("{} {}", state_icon(state), state_label(state))
    } else {
        format!("{} {} ({state})", state_icon(state), state_label(state))
    }
}

fn submitted_field(current: &StatusRecord) -> EmbedField {
    let value = current
        .submitted_at
        .as_deref()
        .map(format_submitted)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    EmbedField::new(FIELD_SUBMITTED, value, false)
}

/// `2026-03-04T05:06:07.000+09:00` -> `2026-03-03 20:06 UTC`. Unparseable input is echoed.
fn format_submitted(raw: &str) -> String {
    let fmt = time::macros::format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|t| t.to_offset(time::UtcOffset::UTC).format(fmt).ok())
        .unwrap_or_else(|| raw.to_string())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn app() -> ApplicationDescriptor {
        ApplicationDescriptor {
            id: "1234567890".into(),
            name: "Demo App".into(),
            webhook_url: "https://example.com/hook".into(),
            icon_url: Some("https://example.com/icon.png".into()),
        }
    }

    fn rec(state: &str, version: &str) -> StatusRecord {
        StatusRecord::new(state, version, "MANUAL")
    }

    fn build(prior: Option<&StatusRecord>, current: &StatusRecord) -> Embed {
        let change = Change::classify(prior, current);
        compose(
            &app(),
            &Footer::default(),
            prior,
            current,
            &change,
            datetime!(2026-10-16 12:00 UTC),
        )
    }

    fn names(embed: &Embed) -> Vec<&str> {
        embed.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn version_only_title() {
        let prior = rec("IN_REVIEW", "1.0");
        let e = build(Some(&prior), &rec("IN_REVIEW", "1.1"));
        assert_eq!(e.title, TITLE_VERSION);
    }

    #[test]
    fn state_only_title() {
        let prior = rec("IN_REVIEW", "1.0");
        let e = build(Some(&prior), &rec("ACCEPTED", "1.0"));
        assert_eq!(e.title, TITLE_STATE);
    }

    #[test]
    fn both_changed_title() {
        let prior = rec("IN_REVIEW", "1.0");
        let e = build(Some(&prior), &rec("ACCEPTED", "1.1"));
        assert_eq!(e.title, TITLE_BOTH);
    }

    #[test]
    fn first_seen_uses_state_title_without_previous_version() {
        let e = build(None, &rec("WAITING_FOR_REVIEW", "1.0"));
        assert_eq!(e.title, TITLE_STATE);
        assert_eq!(
            names(&e),
            vec![FIELD_STATE, FIELD_VERSION, FIELD_RELEASE, FIELD_SUBMITTED]
        );
    }

    #[test]
    fn version_change_adds_previous_version_before_submitted() {
        let prior = rec("IN_REVIEW", "1.0");
        let e = build(Some(&prior), &rec("IN_REVIEW", "1.1"));
        assert_eq!(
            names(&e),
            vec![FIELD_STATE, FIELD_VERSION, FIELD_RELEASE, FIELD_PREVIOUS, FIELD_SUBMITTED]
        );
        assert_eq!(e.fields[3].value, "1.0");
    }

    #[test]
    fn version_field_renders_build_for_build_relevant_state() {
        let current = rec("IN_REVIEW", "1.2.0").with_build("45");
        let e = build(None, &current);
        assert_eq!(e.fields[1].value, "1.2.0 (45)");
    }

    #[test]
    fn version_field_plain_for_rejected() {
        let mut current = rec("REJECTED", "1.2.0");
        current.build_number = Some("45".into());
        let e = build(None, &current);
        assert_eq!(e.fields[1].value, "1.2.0");
    }

    #[test]
    fn state_field_and_color() {
        let e = build(None, &rec("REJECTED", "1.0"));
        assert_eq!(e.fields[0].value, "❌ Rejected");
        assert_eq!(e.color, 0xE74C3C);
    }

    #[test]
    fn unknown_state_never_fails() {
        let e = build(None, &rec("BRAND_NEW_STATE", "1.0"));
        assert_eq!(e.fields[0].value, "❔ Unknown Status (BRAND_NEW_STATE)");
        assert_eq!(e.color, 0x95A5A6);
        assert_eq!(e.fields[1].value, "1.0");
    }

    #[test]
    fn release_mode_fallback_echoes_raw() {
        let mut current = rec("ACCEPTED", "1.0");
        current.release_mode = "PHASED".into();
        let e = build(None, &current);
        assert_eq!(e.fields[2].value, "PHASED");
    }

    #[test]
    fn submitted_formatting() {
        let current = rec("ACCEPTED", "1.0").with_submitted_at("2026-03-04T05:06:07.000+09:00");
        let e = build(None, &current);
        assert_eq!(e.fields[3].value, "2026-03-03 20:06 UTC");

        let e = build(None, &rec("ACCEPTED", "1.0"));
        assert_eq!(e.fields[3].value, "N/A");

        let odd = rec("ACCEPTED", "1.0").with_submitted_at("yesterday");
        assert_eq!(build(None, &odd).fields[3].value, "yesterday");
    }

    #[test]
    fn metadata_fields() {
        let e = build(None, &rec("ACCEPTED", "1.0"));
        assert_eq!(e.author.name, "Demo App");
        assert_eq!(e.author.icon_url.as_deref(), Some("https://example.com/icon.png"));
        assert_eq!(e.footer.text, "App Store Connect");
        assert_eq!(e.url, "https://appstoreconnect.apple.com/apps/1234567890/appstore");
        assert_eq!(e.timestamp, "2026-10-16T12:00:00Z");
    }

    #[test]
    fn payload_json_shape() {
        let payload = WebhookPayload::from(build(None, &rec("ACCEPTED", "1.0")));
        let json = serde_json::to_value(&payload).unwrap();
        let embed = &json["embeds"][0];
        assert_eq!(embed["title"], TITLE_STATE);
        assert_eq!(embed["color"], 0x2ECC71);
        assert_eq!(embed["fields"][0]["name"], "Status");
        assert_eq!(embed["fields"][0]["inline"], true);
        assert_eq!(embed["author"]["name"], "Demo App");
        assert!(embed["footer"]["icon_url"].is_string());
    }

    #[test]
    fn sample_is_labelled_as_test() {
        let e = sample(&app(), &Footer::default(), datetime!(2026-10-16 12:00 UTC));
        assert!(e.title.contains("test"));
        assert_eq!(e.fields[1].value, "0.0.0 (0)");
    }
}
