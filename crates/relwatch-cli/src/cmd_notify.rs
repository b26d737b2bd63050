use std::path::Path;

use clap::Subcommand;
use relwatch_core::config::WatchConfig;
use relwatch_notify::{sample, Notifier, WebhookNotifier, WebhookPayload};
use time::OffsetDateTime;

#[derive(Subcommand)]
pub enum NotifyCmd {
    /// Send a test notification to every configured app's webhook
    Test,
}

pub fn run(cmd: NotifyCmd, config_path: &Path) -> anyhow::Result<()> {
    let config = WatchConfig::load(config_path)?;
    match cmd {
        NotifyCmd::Test => run_test(&config, &WebhookNotifier),
    }
}

fn run_test(config: &WatchConfig, notifier: &impl Notifier) -> anyhow::Result<()> {
    println!(
        "Sending test notification to {} app(s)...",
        config.apps.len()
    );
    let now = OffsetDateTime::now_utc();
    for app in &config.apps {
        let payload = WebhookPayload::from(sample(app, &config.footer, now));
        match notifier.deliver(&app.webhook_url, &payload) {
            Ok(()) => println!("  OK  {}", app.name),
            Err(e) => println!("  ERR {}: {e:#}", app.name),
        }
    }
    Ok(())
}
