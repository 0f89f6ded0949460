use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Row counts for the main tables.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableCounts {
    pub users: i64,
    pub routines: i64,
    pub schedules: i64,
    pub completions: i64,
}

pub fn table_counts(conn: &Connection) -> AppResult<TableCounts> {
    let count = |table: &str| -> AppResult<i64> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?)
    };

    Ok(TableCounts {
        users: count("users")?,
        routines: count("routines")?,
        schedules: count("routine_schedules")?,
        completions: count("task_completions")?,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TABLE COUNTS
    //
    let counts = table_counts(&pool.conn)?;
    println!("{}• Users:{} {}{}{}", CYAN, RESET, GREEN, counts.users, RESET);
    println!(
        "{}• Routines:{} {}{}{}",
        CYAN, RESET, GREEN, counts.routines, RESET
    );
    println!(
        "{}• Schedules:{} {}{}{}",
        CYAN, RESET, GREEN, counts.schedules, RESET
    );
    println!(
        "{}• Completions:{} {}{}{}",
        CYAN, RESET, GREEN, counts.completions, RESET
    );

    //
    // 3) COMPLETION DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM task_completions",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let placeholder = format!("{GREY}--{RESET}");

    println!("{}• Completions range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(|| placeholder.clone()));
    println!("    to:   {}", last.unwrap_or(placeholder));

    println!();
    Ok(())
}
