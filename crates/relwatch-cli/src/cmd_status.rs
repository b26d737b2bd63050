use std::path::Path;

use relwatch_core::config::WatchConfig;
use relwatch_core::state::{release_mode_label, state_icon, state_label};
use relwatch_store::StatusStore;

/// `relwatch status`
pub fn execute(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = WatchConfig::load(config_path)?;
    let store = StatusStore::new(config.state_path());
    let records = store.load();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for app in &config.apps {
        match records.get(&app.id) {
            Some(rec) => println!(
                "{} ({}): {} {} · {} · {}",
                app.name,
                app.id,
                state_icon(&rec.lifecycle_state),
                state_label(&rec.lifecycle_state),
                rec.display_version(),
                release_mode_label(&rec.release_mode),
            ),
            None => println!("{} ({}): (not polled yet)", app.name, app.id),
        }
    }
    Ok(())
}
