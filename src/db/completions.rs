use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::completion::TaskCompletion;
use crate::models::routine::Routine;
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_COMPLETION: &str = "SELECT c.id, c.user_id, c.routine_id, c.date, c.completed,
            c.actual_start_time, c.actual_end_time, c.created_at
     FROM task_completions c";

const SELECT_WITH_ROUTINE: &str = "SELECT c.id, c.user_id, c.routine_id, c.date, c.completed,
            c.actual_start_time, c.actual_end_time, c.created_at,
            r.task_name, r.start_time, r.end_time,
            r.created_at AS r_created_at, r.updated_at AS r_updated_at, r.user_id AS r_user_id
     FROM task_completions c
     JOIN routines r ON r.id = c.routine_id";

fn parse_opt_instant(
    idx: usize,
    raw: Option<String>,
) -> rusqlite::Result<Option<DateTime<FixedOffset>>> {
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(Some)
            .map_err(|_| conversion_error(idx, AppError::InvalidTime(s))),
    }
}

pub fn map_row(row: &Row) -> rusqlite::Result<TaskCompletion> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(3, AppError::InvalidDate(date_str.clone())))?;

    Ok(TaskCompletion {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        routine_id: row.get("routine_id")?,
        date,
        completed: row.get::<_, i64>("completed")? == 1,
        actual_start_time: parse_opt_instant(5, row.get("actual_start_time")?)?,
        actual_end_time: parse_opt_instant(6, row.get("actual_end_time")?)?,
        created_at: row.get("created_at")?,
    })
}

fn map_joined(row: &Row) -> rusqlite::Result<(TaskCompletion, Routine)> {
    let completion = map_row(row)?;
    let routine = Routine {
        id: completion.routine_id,
        user_id: row.get("r_user_id")?,
        task_name: row.get("task_name")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        created_at: row.get("r_created_at")?,
        updated_at: row.get("r_updated_at")?,
    };
    Ok((completion, routine))
}

fn date_param(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn instant_param(t: Option<&DateTime<FixedOffset>>) -> Option<String> {
    t.map(|t| t.to_rfc3339())
}

pub fn find_completion(
    conn: &Connection,
    routine_id: i64,
    user_id: i64,
    date: NaiveDate,
) -> AppResult<Option<TaskCompletion>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_COMPLETION} WHERE c.routine_id = ?1 AND c.user_id = ?2 AND c.date = ?3"
    ))?;
    Ok(stmt
        .query_row(params![routine_id, user_id, date_param(date)], map_row)
        .optional()?)
}

pub fn find_completion_by_id(conn: &Connection, id: i64) -> AppResult<Option<TaskCompletion>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_COMPLETION} WHERE c.id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn insert_completion(conn: &Connection, c: &TaskCompletion) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO task_completions
            (user_id, routine_id, date, completed, actual_start_time, actual_end_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            c.user_id,
            c.routine_id,
            date_param(c.date),
            if c.completed { 1 } else { 0 },
            instant_param(c.actual_start_time.as_ref()),
            instant_param(c.actual_end_time.as_ref()),
            c.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update flag and actual times of an existing completion.
pub fn update_completion(conn: &Connection, c: &TaskCompletion) -> AppResult<()> {
    conn.execute(
        "UPDATE task_completions
         SET completed = ?1, actual_start_time = ?2, actual_end_time = ?3
         WHERE id = ?4",
        params![
            if c.completed { 1 } else { 0 },
            instant_param(c.actual_start_time.as_ref()),
            instant_param(c.actual_end_time.as_ref()),
            c.id,
        ],
    )?;
    Ok(())
}

/// Completions of a user for one date, each with its routine.
pub fn load_for_date(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
) -> AppResult<Vec<(TaskCompletion, Routine)>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_WITH_ROUTINE} WHERE c.user_id = ?1 AND c.date = ?2 ORDER BY c.id"
    ))?;
    let rows = stmt.query_map(params![user_id, date_param(date)], map_joined)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Completed completions of a user in `[from, to]`, each with its routine.
pub fn load_completed_between(
    conn: &Connection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<(TaskCompletion, Routine)>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_WITH_ROUTINE}
         WHERE c.user_id = ?1 AND c.completed = 1 AND c.date >= ?2 AND c.date <= ?3
         ORDER BY c.date, c.id"
    ))?;
    let rows = stmt.query_map(
        params![user_id, date_param(from), date_param(to)],
        map_joined,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of completed tasks of a user on a date.
pub fn count_completed_on(conn: &Connection, user_id: i64, date: NaiveDate) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM task_completions
         WHERE user_id = ?1 AND date = ?2 AND completed = 1",
        params![user_id, date_param(date)],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(n).unwrap_or(0))
}

/// Timestamp for a new completion row.
pub fn now_stamp() -> String {
    Local::now().to_rfc3339()
}
