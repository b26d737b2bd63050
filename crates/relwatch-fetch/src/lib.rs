pub mod client;
pub mod error;
pub mod parse;
pub mod token;

pub use client::{ApiClient, StatusSource};
pub use error::FetchError;
pub use token::{StaticToken, TokenProvider};
