use crate::errors::AppResult;
use crate::models::routine::{Routine, RoutineDraft};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_ROUTINE: &str =
    "SELECT id, user_id, task_name, start_time, end_time, created_at, updated_at FROM routines";

pub fn map_row(row: &Row) -> rusqlite::Result<Routine> {
    Ok(Routine {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        task_name: row.get("task_name")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_routine(conn: &Connection, user_id: i64, draft: &RoutineDraft) -> AppResult<Routine> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO routines (user_id, task_name, start_time, end_time, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )?;
    stmt.execute(params![
        user_id,
        draft.task_name,
        draft.start_time,
        draft.end_time,
        now
    ])?;

    Ok(Routine {
        id: conn.last_insert_rowid(),
        user_id,
        task_name: draft.task_name.clone(),
        start_time: draft.start_time.clone(),
        end_time: draft.end_time.clone(),
        created_at: now.clone(),
        updated_at: now,
    })
}

pub fn find_routine(conn: &Connection, id: i64) -> AppResult<Option<Routine>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_ROUTINE} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// All routines of a user, in insertion order. Ordering by time of day is
/// applied by `core::routine`.
pub fn load_routines(conn: &Connection, user_id: i64) -> AppResult<Vec<Routine>> {
    let mut stmt =
        conn.prepare_cached(&format!("{SELECT_ROUTINE} WHERE user_id = ?1 ORDER BY id ASC"))?;
    let rows = stmt.query_map([user_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_routines(conn: &Connection, user_id: i64) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM routines WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(n).unwrap_or(0))
}

/// Update name and times (all fields except ids and created_at).
pub fn update_routine(conn: &Connection, id: i64, draft: &RoutineDraft) -> AppResult<()> {
    conn.execute(
        "UPDATE routines
         SET task_name = ?1, start_time = ?2, end_time = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            draft.task_name,
            draft.start_time,
            draft.end_time,
            Local::now().to_rfc3339(),
            id
        ],
    )?;
    Ok(())
}

pub fn delete_routine(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM routines WHERE id = ?1", [id])?;
    Ok(())
}

/// Delete every routine of a user; schedules and completions cascade.
pub fn delete_all_routines(conn: &Connection, user_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM routines WHERE user_id = ?1", [user_id])?)
}
