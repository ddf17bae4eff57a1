//! Simpli.fi tap CLI
//!
//! Messages go to stdout; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use simplifi_tap::cli::{Cli, Runner};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping after the current step");
            on_signal.cancel();
        }
    });

    if let Err(e) = run(cli, &cancel).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, cancel: &CancellationToken) -> anyhow::Result<()> {
    let command = format!("{:?}", cli.command);
    Runner::new(cli)
        .run(cancel)
        .await
        .with_context(|| format!("{command} failed"))
}
