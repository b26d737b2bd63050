use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use crate::compose::WebhookPayload;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Delivery endpoint for composed notifications.
pub trait Notifier {
    fn deliver(&self, webhook_url: &str, payload: &WebhookPayload) -> anyhow::Result<()>;
}

/// Generic JSON POST to a webhook URL. No retry.
#[derive(Debug, Clone, Default)]
pub struct WebhookNotifier;

impl Notifier for WebhookNotifier {
    fn deliver(&self, webhook_url: &str, payload: &WebhookPayload) -> anyhow::Result<()> {
        let body = serde_json::to_string(payload)?;
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(TIMEOUT))
            .build()
            .new_agent();
        agent
            .post(webhook_url)
            .header("Content-Type", "application/json")
            .send(body)
            .with_context(|| format!("posting notification to {}", redact(webhook_url)))?;
        debug!(url = %redact(webhook_url), "notification delivered");
        Ok(())
    }
}

/// Webhook URLs carry their secret in the path; keep only scheme and host for logs.
pub fn redact(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => {
            let host = rest.split('/').next().unwrap_or(rest);
            format!("{scheme}://{host}/…")
        }
        None => "<webhook>".to_string(),
    }
}
