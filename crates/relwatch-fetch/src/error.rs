use thiserror::Error;

/// Why a status fetch for one application failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unauthorized (401): API credential is likely expired or invalid")]
    Unauthorized,
    #[error("not found (404): unknown application id {0}")]
    NotFound(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("credential unavailable: {0}")]
    Credential(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("no {platform} version found for app {app_id}")]
    NoPlatformVersion { app_id: String, platform: String },
}

impl FetchError {
    /// Short machine-friendly name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Unauthorized => "unauthorized",
            FetchError::NotFound(_) => "not_found",
            FetchError::Status(_) => "status",
            FetchError::Transport(_) => "transport",
            FetchError::Credential(_) => "credential",
            FetchError::Decode(_) => "decode",
            FetchError::NoPlatformVersion { .. } => "no_platform_version",
        }
    }

    pub(crate) fn from_ureq(err: ureq::Error, app_id: &str) -> Self {
        match err {
            ureq::Error::StatusCode(401) => FetchError::Unauthorized,
            ureq::Error::StatusCode(404) => FetchError::NotFound(app_id.to_string()),
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport(other.to_string()),
        }
    }
}
