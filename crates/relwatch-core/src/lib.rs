pub mod config;
pub mod detect;
pub mod state;
pub mod types;

pub use types::*;
