mod cmd_notify;
mod cmd_poll;
mod cmd_status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "relwatch",
    version,
    about = "Watch app review and release status and post changes to webhooks"
)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = relwatch_core::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one polling pass over all configured apps
    Poll,
    /// Show the last observed status of each app
    Status {
        /// Output the raw status file as JSON
        #[arg(long)]
        json: bool,
    },
    /// Notification channel operations
    Notify {
        #[command(subcommand)]
        cmd: cmd_notify::NotifyCmd,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("RELWATCH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.cmd {
        Command::Poll => cmd_poll::execute(&cli.config),
        Command::Status { json } => cmd_status::execute(&cli.config, json),
        Command::Notify { cmd } => cmd_notify::run(cmd, &cli.config),
    }
}
