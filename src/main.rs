//! news-harvester service binary.
//!
//! Loads the JSON configuration, wires up the durable store, and runs the
//! harvest cycle either once or on the configured poll interval.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_harvester::{Config, Harvester, RedisStore, Result};

#[derive(Parser, Debug)]
#[command(name = "news-harvester")]
#[command(about = "Polls a remote archive drop and loads new documents into a durable queue")]
struct Cli {
    /// Base URL of the remote directory listing (overrides the config file)
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// Re-process a single named archive from the current listing
    #[arg(short = 'r', long = "rerun")]
    rerun: Option<String>,

    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config", default_value = "cfg.json")]
    config: PathBuf,
}

/// RUST_LOG wins when set; otherwise the config's verbose flag picks the
/// default filter.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The config is loaded before tracing is up because the verbose flag
    // picks the default log filter, so load failures go straight to stderr.
    let mut config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    config.apply_overrides(cli.url, cli.rerun);

    init_tracing(config.debug.verbose);

    if let Err(e) = run(config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    config.validate()?;
    debug!("Service [{}] started", config.service_name);

    // The scratch root may already exist from an earlier run; real problems
    // with it surface when the first run directory is created inside.
    let _ = std::fs::create_dir(&config.scratch.root);

    let store = Arc::new(RedisStore::connect(&config.store).await?);
    let harvester = Harvester::new(config, store)?;
    harvester.run().await
}
