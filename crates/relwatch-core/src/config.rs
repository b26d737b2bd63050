use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::types::ApplicationDescriptor;

pub const DEFAULT_CONFIG_FILE: &str = "relwatch.json";
pub const DEFAULT_STATE_FILE: &str = "status.json";
pub const DEFAULT_PLATFORM: &str = "IOS";
pub const DEFAULT_TOKEN_ENV: &str = "RELWATCH_API_TOKEN";
pub const DEFAULT_API_BASE_URL: &str = "https://api.appstoreconnect.apple.com";
pub const DEFAULT_FOOTER_TEXT: &str = "App Store Connect";
pub const DEFAULT_FOOTER_ICON: &str =
    "https://developer.apple.com/assets/elements/icons/app-store-connect/app-store-connect-128x128_2x.png";

/// Static footer attached to every notification.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Footer {
    pub text: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            text: DEFAULT_FOOTER_TEXT.to_string(),
            icon_url: Some(DEFAULT_FOOTER_ICON.to_string()),
        }
    }
}

/// Run configuration, read from `relwatch.json`.
#[derive(Deserialize, Clone, Debug)]
pub struct WatchConfig {
    pub apps: Vec<ApplicationDescriptor>,
    #[serde(default)]
    pub state_path: Option<PathBuf>,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub footer: Footer,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl WatchConfig {
    /// Read, parse and validate a config file. Any failure is fatal for the run.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let mut config: WatchConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config: {}", path.display()))?;
        config.resolve_state_path(path);
        config.validate()?;
        Ok(config)
    }

    /// Make `state_path` absolute relative to the config file's directory.
    fn resolve_state_path(&mut self, config_path: &Path) {
        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        let state = self
            .state_path
            .take()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
        self.state_path = Some(if state.is_absolute() {
            state
        } else {
            base.join(state)
        });
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.apps.is_empty() {
            anyhow::bail!("no apps configured");
        }
        for (i, app) in self.apps.iter().enumerate() {
            if app.id.trim().is_empty() {
                anyhow::bail!("apps[{i}]: missing id");
            }
            if app.name.trim().is_empty() {
                anyhow::bail!("apps[{i}] ({}): missing name", app.id);
            }
            if app.webhook_url.trim().is_empty() {
                anyhow::bail!("apps[{i}] ({}): missing webhook_url", app.id);
            }
        }
        if self.platform.trim().is_empty() {
            anyhow::bail!("platform must not be empty");
        }
        Ok(())
    }

    /// Status file location. Falls back to `status.json` in the working directory.
    pub fn state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE))
    }
}
