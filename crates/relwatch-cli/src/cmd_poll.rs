use std::path::Path;

use relwatch_core::config::WatchConfig;
use relwatch_fetch::{ApiClient, StaticToken};
use relwatch_notify::WebhookNotifier;
use relwatch_poll::{PollOutcome, Poller};
use relwatch_store::StatusStore;
use tracing::info;

/// `relwatch poll`
///
/// Config and credential problems are fatal; per-app failures are reported
/// and the command still succeeds.
pub fn execute(config_path: &Path) -> anyhow::Result<()> {
    let config = WatchConfig::load(config_path)?;
    let token = StaticToken::from_env(&config.token_env)?;

    let client = ApiClient::new(&config.api_base_url, &config.platform, token);
    let store = StatusStore::new(config.state_path());
    info!(
        apps = config.apps.len(),
        state = %store.path().display(),
        "starting poll"
    );

    let poller = Poller::new(&client, &WebhookNotifier, &store, &config.footer);
    let report = poller.run(&config.apps);

    for app in &report.apps {
        let line = match &app.result {
            Ok(PollOutcome::Unchanged) => "unchanged".to_string(),
            Ok(PollOutcome::Notified) => "notified".to_string(),
            Ok(PollOutcome::DeliveryFailed(e)) => format!("recorded, delivery failed: {e}"),
            Err(e) => format!("error: {e}"),
        };
        println!("{:<16} {line}", app.app_id);
    }
    Ok(())
}
