//! Schema migrations.
//!
//! Every migration has a version tag; once applied, a `migration_applied`
//! row carrying that tag is written to the `log` table, and the migration is
//! skipped on later runs. Migrations run in declaration order, each inside
//! its own transaction.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};
use tracing::info;

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_initial_schema",
        description: "Created users, routines, routine_schedules and task_completions tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            token       TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS routines (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            task_name   TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS routine_schedules (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            routine_id   INTEGER NOT NULL REFERENCES routines(id) ON DELETE CASCADE,
            day_of_week  INTEGER NOT NULL CHECK(day_of_week BETWEEN 0 AND 6),
            created_at   TEXT NOT NULL,
            updated_at   TEXT NOT NULL,
            UNIQUE(routine_id, day_of_week)
        );

        CREATE TABLE IF NOT EXISTS task_completions (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id            INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            routine_id         INTEGER NOT NULL REFERENCES routines(id) ON DELETE CASCADE,
            date               TEXT NOT NULL,
            completed          INTEGER NOT NULL DEFAULT 0,
            actual_start_time  TEXT,
            actual_end_time    TEXT,
            created_at         TEXT NOT NULL,
            UNIQUE(routine_id, user_id, date)
        );
        "#,
    },
    Migration {
        version: "20250310_0002_lookup_indexes",
        description: "Added per-user lookup indexes",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_routines_user ON routines(user_id);
        CREATE INDEX IF NOT EXISTS idx_schedules_user_day ON routine_schedules(user_id, day_of_week);
        CREATE INDEX IF NOT EXISTS idx_completions_user_date ON task_completions(user_id, date);
        "#,
    },
];

/// Ensure that the `log` table exists; migrations are recorded in it.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let batch = format!(
        "BEGIN;
         {}
         INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', '{}', '{}');
         COMMIT;",
        m.sql, m.version, m.description
    );

    if let Err(e) = conn.execute_batch(&batch) {
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(AppError::Migration(format!("{}: {}", m.version, e)));
    }

    info!(version = m.version, "{}", m.description);
    Ok(())
}

/// Versions of all known migrations that are not yet applied.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
