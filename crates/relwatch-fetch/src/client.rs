use std::time::Duration;

use relwatch_core::StatusRecord;
use tracing::debug;

use crate::error::FetchError;
use crate::parse::parse_versions;
use crate::token::TokenProvider;

const TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can produce the current status of an application.
pub trait StatusSource {
    fn fetch(&self, app_id: &str) -> Result<StatusRecord, FetchError>;
}

/// Blocking client for the app-distribution API.
pub struct ApiClient<T: TokenProvider> {
    base_url: String,
    platform: String,
    tokens: T,
    agent: ureq::Agent,
}

impl<T: TokenProvider> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, platform: impl Into<String>, tokens: T) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(TIMEOUT))
            .build()
            .new_agent();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            platform: platform.into(),
            tokens,
            agent,
        }
    }

    fn versions_url(&self, app_id: &str) -> String {
        format!("{}/v1/apps/{}/appStoreVersions", self.base_url, app_id)
    }
}

impl<T: TokenProvider> StatusSource for ApiClient<T> {
    fn fetch(&self, app_id: &str) -> Result<StatusRecord, FetchError> {
        let token = self
            .tokens
            .token()
            .map_err(|e| FetchError::Credential(e.to_string()))?;
        let url = self.versions_url(app_id);
        debug!(app_id, url = %url, "fetching versions");

        let mut response = self
            .agent
            .get(&url)
            .query("filter[platform]", &self.platform)
            .query("include", "build")
            .query("limit", "1")
            .header("Authorization", &format!("Bearer {token}"))
            .call()
            .map_err(|e| FetchError::from_ureq(e, app_id))?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_versions(&body, app_id, &self.platform)
    }
}
