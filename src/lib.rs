//! routinely library root.
//! Exposes CLI parser, HTTP API, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod http;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;
use utils::path::resolve_db_path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::User { .. } => cli::commands::user::handle(cli, cfg),
        Commands::Routine { .. } => cli::commands::routine::handle(cli, cfg),
        Commands::Schedule { .. } => cli::commands::schedule::handle(cli, cfg),
        Commands::Done { .. } => cli::commands::done::handle(cli, cfg),
        Commands::Status { .. } => cli::commands::status::handle(cli, cfg),
        Commands::Perf { .. } => cli::commands::perf::handle(cli, cfg),
        Commands::Timing { .. } => cli::commands::timing::handle(cli, cfg),
        Commands::Serve { .. } => cli::commands::serve::handle(cli, cfg),
    }
}

/// Operational logs go to stderr so stdout stays clean for command output.
/// `RUST_LOG` wins over the configured `log_level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once and shared by every command
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = resolve_db_path(custom_db);
    }

    init_tracing(&cfg.log_level);

    dispatch(&cli, &cfg)
}
