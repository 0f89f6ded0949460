use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::db::log;
use crate::db::users::find_or_create;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - the default user, whose API token is printed
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing routinely…");

    let pool = open_ready(&db_path)?;
    success(format!("Database initialized at {}", &db_path));

    let name = cli.user.as_deref().unwrap_or(&cfg.default_user);
    let user = find_or_create(&pool.conn, name)?;
    println!("👤 User  : {}", user.name);
    println!("🔑 Token : {}", user.token);

    // audit entry is best effort
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 routinely initialization completed!");
    Ok(())
}
