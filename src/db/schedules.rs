use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::day_of_week::DayOfWeek;
use crate::models::routine::Routine;
use crate::models::schedule::RoutineSchedule;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_SCHEDULE: &str = "SELECT s.id, s.user_id, s.routine_id, s.day_of_week,
            s.created_at, s.updated_at,
            r.task_name, r.start_time, r.end_time,
            r.created_at AS r_created_at, r.updated_at AS r_updated_at
     FROM routine_schedules s
     JOIN routines r ON r.id = s.routine_id";

pub fn map_row(row: &Row) -> rusqlite::Result<RoutineSchedule> {
    let raw_day: i64 = row.get("day_of_week")?;
    let day_of_week = DayOfWeek::from_db(raw_day)
        .ok_or_else(|| conversion_error(3, AppError::InvalidDayOfWeek(raw_day.to_string())))?;

    let routine_id: i64 = row.get("routine_id")?;
    let user_id: i64 = row.get("user_id")?;

    Ok(RoutineSchedule {
        id: row.get("id")?,
        user_id,
        routine_id,
        day_of_week,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        routine: Some(Routine {
            id: routine_id,
            user_id,
            task_name: row.get("task_name")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            created_at: row.get("r_created_at")?,
            updated_at: row.get("r_updated_at")?,
        }),
    })
}

fn collect(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<RoutineSchedule>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(args, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_schedule(
    conn: &Connection,
    user_id: i64,
    routine_id: i64,
    day: DayOfWeek,
) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO routine_schedules (user_id, routine_id, day_of_week, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![user_id, routine_id, day.to_db(), now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_schedule(conn: &Connection, id: i64) -> AppResult<Option<RoutineSchedule>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_SCHEDULE} WHERE s.id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn find_by_routine_and_day(
    conn: &Connection,
    routine_id: i64,
    day: DayOfWeek,
) -> AppResult<Option<RoutineSchedule>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_SCHEDULE} WHERE s.routine_id = ?1 AND s.day_of_week = ?2"
    ))?;
    Ok(stmt
        .query_row(params![routine_id, day.to_db()], map_row)
        .optional()?)
}

/// Schedules of a user, optionally restricted to one day.
pub fn load_schedules(
    conn: &Connection,
    user_id: i64,
    day: Option<DayOfWeek>,
) -> AppResult<Vec<RoutineSchedule>> {
    match day {
        Some(d) => collect(
            conn,
            &format!(
                "{SELECT_SCHEDULE} WHERE s.user_id = ?1 AND s.day_of_week = ?2
                 ORDER BY s.day_of_week, s.id"
            ),
            &[&user_id, &d.to_db()],
        ),
        None => collect(
            conn,
            &format!("{SELECT_SCHEDULE} WHERE s.user_id = ?1 ORDER BY s.day_of_week, s.id"),
            &[&user_id],
        ),
    }
}

pub fn delete_schedule(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM routine_schedules WHERE id = ?1", [id])?;
    Ok(())
}
