use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::errors::{AppError, AppResult};
use crate::http::{self, AppState};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind } = &cli.command {
        let addr = bind.clone().unwrap_or_else(|| cfg.bind.clone());
        let pool = open_ready(&cfg.database)?;
        let state = AppState::new(pool, cfg.grace_minutes);

        tracing::info!(database = %cfg.database, grace_minutes = cfg.grace_minutes, "starting server");

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::Server(format!("failed to start runtime: {e}")))?;

        runtime.block_on(http::serve(state, &addr))?;
    }

    Ok(())
}
