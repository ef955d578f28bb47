use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rath_application::SessionBootstrap;
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser)]
#[command(name = "rath")]
#[command(about = "RATH - session state and computation engine control", long_about = None)]
struct Cli {
    /// Directory holding config.toml and persisted session data
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current session state as JSON
    Status,
    /// Switch the computation engine (webworker, clickhouse)
    Engine { engine: String },
    /// Set the explore mode (comprehensive, familiar, manual)
    ExploreMode { mode: String },
    /// Set the task test mode (local, remote)
    TaskMode { mode: String },
    /// Persist the dataSource configuration
    Save,
    /// Report whether the dataSource configuration was restored
    Load,
    /// Show the dataset picker
    Datasets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let bootstrap = SessionBootstrap::new(cli.home);
    let config = bootstrap.load_config()?;
    init_tracing(config.log_level.as_deref());

    let session = bootstrap.start(config).await?;
    tracing::debug!("[Cli] Session ready, engine live: {}", session.store.is_engine_live());

    match cli.command {
        Commands::Status => commands::status::run(&session)?,
        Commands::Engine { engine } => commands::engine::run(&session, &engine).await?,
        Commands::ExploreMode { mode } => commands::mode::explore(&session, &mode).await?,
        Commands::TaskMode { mode } => commands::mode::task(&session, &mode).await?,
        Commands::Save => commands::config::save(&session).await?,
        Commands::Load => commands::config::load(&session)?,
        Commands::Datasets => commands::datasets::run(&session)?,
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or(DEFAULT_LOG_LEVEL)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
