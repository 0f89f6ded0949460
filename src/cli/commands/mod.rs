pub mod config;
pub mod db;
pub mod done;
pub mod init;
pub mod log;
pub mod perf;
pub mod routine;
pub mod schedule;
pub mod serve;
pub mod status;
pub mod timing;
pub mod user;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::db::pool::DbPool;
use crate::db::users::{find_by_name, find_or_create};
use crate::errors::{AppError, AppResult};
use crate::models::user::User;

/// Open the configured database and resolve the acting user.
///
/// An explicit `--user` must already exist; the configured default user is
/// created on first use.
pub(crate) fn open_session(cli: &Cli, cfg: &Config) -> AppResult<(DbPool, User)> {
    let pool = open_ready(&cfg.database)?;

    let user = match &cli.user {
        Some(name) => find_by_name(&pool.conn, name)?
            .ok_or_else(|| AppError::UnknownUser(name.clone()))?,
        None => find_or_create(&pool.conn, &cfg.default_user)?,
    };

    Ok((pool, user))
}
