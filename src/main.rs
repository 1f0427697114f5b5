//! Salesboard main entry point

use clap::Parser;
use salesboard_api::{start_server, AppState};
use salesboard_config::{Config, ConfigError};
use salesboard_core::{HttpSeedSource, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "salesboard")]
#[command(version = "0.1.0")]
#[command(about = "Sale transactions, monthly statistics and chart data over HTTP", long_about = None)]
struct Args {
    /// Configuration file path (defaults to ./config.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed the record store before serving
    #[arg(long)]
    seed: bool,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Print what was wrong with the configuration and how to fix it
fn rejected(error: ConfigError) -> anyhow::Error {
    eprintln!("Configuration rejected:\n{}", error.to_details());
    error.into()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (path, required) = match args.config {
        Some(path) => (path, true),
        None => (PathBuf::from("config.yaml"), false),
    };
    let config = Config::load_with_env(&path, required).map_err(rejected)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();
    log::info!("Config loaded: store={}, seed source={}", config.store.uri, config.seed.source_url);

    let rt = Runtime::new()?;
    rt.block_on(async {
        let location = config.store_location().map_err(anyhow::Error::msg)?;
        let store = Arc::new(MemoryStore::open(&location).await?);
        match store.snapshot_path() {
            Some(path) => log::info!("Records persist to {}", path.display()),
            None => log::info!("Records are kept in memory only"),
        }
        let source = Arc::new(HttpSeedSource::from_config(&config.seed)?);

        let seed_on_startup = args.seed || config.seed.on_startup;
        let state = AppState::new(config, store, source).map_err(rejected)?;

        if seed_on_startup {
            match state.seeder.run().await {
                Ok(report) => log::info!("Startup seed inserted {} records", report.inserted),
                Err(e) => log::error!("Startup seed failed, serving existing records: {}", e),
            }
        }

        start_server(state).await
    })
}
