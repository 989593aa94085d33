use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use subscription_normalizer::{
    config::{Config, load_config},
    metrics::METRICS,
    replay::Replayer,
};

/// Normalize recorded exchange subscription confirmations into
/// canonical (channel, symbols) filters.
#[derive(Parser)]
#[command(name = "subscription-normalizer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Recorded messages, one JSON record per line (`.gz` supported)
    input: PathBuf,
}

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Responsibilities:
// - Load configuration (defaults if the file is missing)
// - Initialize logging
// - Replay the input file, writing filter records to stdout
// - Report metrics
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(&cli.config)?;
    let config_found = loaded.is_some();
    let config: Config = loaded.unwrap_or_default();

    let level = if cli.verbose || config.debug_log() { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if !config_found {
        warn!(
            "config {} not found, normalizing every supported exchange",
            cli.config.display()
        );
    }

    let enabled = config.enabled_exchanges();
    info!(
        "Replaying {} for {}",
        cli.input.display(),
        enabled.iter().map(|e| e.as_str()).collect::<Vec<_>>().join(",")
    );

    let replayer = Replayer::new(enabled, config.output.pretty);
    let mut stdout = std::io::stdout().lock();
    let summary = replayer.run_file(&cli.input, &mut stdout).await?;

    info!(
        "Replay finished: {} line(s), {} confirmation(s), {} malformed",
        summary.lines, summary.confirmations, summary.malformed
    );
    info!("{}", **METRICS);

    Ok(())
}
