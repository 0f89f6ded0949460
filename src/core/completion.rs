use crate::core::punctuality;
use crate::core::routine::owned_routine;
use crate::db::completions::{
    find_completion, find_completion_by_id, insert_completion, load_for_date, now_stamp,
    update_completion,
};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::completion::{CompletionInput, CompletionUpdate, CompletionView, TaskCompletion};
use crate::utils::date::{date_str, parse_date};
use chrono::NaiveDate;

/// Check that a completion body names a routine and a valid date.
pub fn validate(input: &CompletionInput) -> AppResult<CompletionUpdate> {
    let date_raw = input
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (routine_id, date_raw) = match (input.routine_id, date_raw) {
        (Some(r), Some(d)) => (r, d),
        (None, Some(_)) => return Err(AppError::MissingFields("routine_id".into())),
        (Some(_), None) => return Err(AppError::MissingFields("date".into())),
        (None, None) => return Err(AppError::MissingFields("routine_id, date".into())),
    };

    let date = parse_date(date_raw).ok_or_else(|| AppError::InvalidDate(date_raw.to_string()))?;

    Ok(CompletionUpdate {
        routine_id,
        date,
        completed: input.completed,
        actual_start_time: input.actual_start_time,
        actual_end_time: input.actual_end_time,
    })
}

pub struct CompletionLogic;

impl CompletionLogic {
    /// Record (or update) the completion of a routine on a date.
    ///
    /// At most one row exists per (routine, user, date). Actual times that
    /// are not supplied keep their stored value.
    pub fn upsert(
        pool: &mut DbPool,
        user_id: i64,
        update: &CompletionUpdate,
    ) -> AppResult<TaskCompletion> {
        let routine = owned_routine(&pool.conn, user_id, update.routine_id)?;

        let tx = pool.conn.transaction()?;

        let id = match find_completion(&tx, update.routine_id, user_id, update.date)? {
            Some(mut existing) => {
                existing.completed = update.completed;
                if update.actual_start_time.is_some() {
                    existing.actual_start_time = update.actual_start_time;
                }
                if update.actual_end_time.is_some() {
                    existing.actual_end_time = update.actual_end_time;
                }
                update_completion(&tx, &existing)?;
                existing.id
            }
            None => insert_completion(
                &tx,
                &TaskCompletion {
                    id: 0,
                    user_id,
                    routine_id: update.routine_id,
                    date: update.date,
                    completed: update.completed,
                    actual_start_time: update.actual_start_time,
                    actual_end_time: update.actual_end_time,
                    created_at: now_stamp(),
                },
            )?,
        };

        ttlog(
            &tx,
            "complete",
            &format!("routine#{}", update.routine_id),
            &format!(
                "'{}' on {} => {}",
                routine.task_name,
                date_str(update.date),
                if update.completed { "done" } else { "not done" }
            ),
        )?;

        tx.commit()?;

        find_completion_by_id(&pool.conn, id)?
            .ok_or_else(|| AppError::NotFound("Completion".into()))
    }

    /// All completions of a user on `date`, each with its routine and
    /// punctuality against that routine's schedule.
    pub fn list_for_date(
        pool: &mut DbPool,
        user_id: i64,
        date: NaiveDate,
        grace_minutes: i64,
    ) -> AppResult<Vec<CompletionView>> {
        Ok(load_for_date(&pool.conn, user_id, date)?
            .into_iter()
            .map(|(completion, routine)| {
                let punctuality = punctuality::evaluate(&routine, &completion, grace_minutes);
                CompletionView {
                    completion,
                    routine,
                    punctuality,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::routines::insert_routine;
    use crate::db::users::insert_user;
    use crate::models::routine::RoutineDraft;
    use chrono::{DateTime, FixedOffset};

    fn setup() -> (DbPool, i64, i64, i64) {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let alice = insert_user(&pool.conn, "alice").unwrap().id;
        let bob = insert_user(&pool.conn, "bob").unwrap().id;
        let routine = insert_routine(
            &pool.conn,
            alice,
            &RoutineDraft::new("Work 1", "10:00 AM", "12:00 PM"),
        )
        .unwrap();
        (pool, alice, bob, routine.id)
    }

    fn at(s: &str) -> Option<DateTime<FixedOffset>> {
        Some(DateTime::parse_from_rfc3339(s).unwrap())
    }

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn upd(routine_id: i64, completed: bool) -> CompletionUpdate {
        CompletionUpdate {
            routine_id,
            date: d("2025-03-03"),
            completed,
            actual_start_time: None,
            actual_end_time: None,
        }
    }

    #[test]
    fn validation_reports_missing_and_bad_fields() {
        let body: CompletionInput = serde_json::from_str(r#"{"date": "2025-03-03"}"#).unwrap();
        assert!(matches!(validate(&body), Err(AppError::MissingFields(f)) if f == "routine_id"));

        let body: CompletionInput =
            serde_json::from_str(r#"{"routineId": 4, "date": "03/03/2025"}"#).unwrap();
        assert!(matches!(validate(&body), Err(AppError::InvalidDate(_))));

        let body: CompletionInput =
            serde_json::from_str(r#"{"routine_id": 4, "date": "2025-03-03"}"#).unwrap();
        let ok = validate(&body).unwrap();
        assert!(!ok.completed);
    }

    #[test]
    fn second_upsert_updates_the_same_row() {
        let (mut pool, alice, _, rid) = setup();

        let first = CompletionLogic::upsert(&mut pool, alice, &upd(rid, true)).unwrap();
        let second = CompletionLogic::upsert(&mut pool, alice, &upd(rid, false)).unwrap();

        assert_eq!(first.id, second.id);
        assert!(!second.completed);
        assert_eq!(
            CompletionLogic::list_for_date(&mut pool, alice, d("2025-03-03"), 10)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn absent_times_keep_stored_values() {
        let (mut pool, alice, _, rid) = setup();

        let mut with_times = upd(rid, true);
        with_times.actual_start_time = at("2025-03-03T10:04:00+01:00");
        with_times.actual_end_time = at("2025-03-03T12:20:00+01:00");
        CompletionLogic::upsert(&mut pool, alice, &with_times).unwrap();

        let mut only_end = upd(rid, true);
        only_end.actual_end_time = at("2025-03-03T12:01:00+01:00");
        let c = CompletionLogic::upsert(&mut pool, alice, &only_end).unwrap();

        assert_eq!(c.actual_start_time, at("2025-03-03T10:04:00+01:00"));
        assert_eq!(c.actual_end_time, at("2025-03-03T12:01:00+01:00"));
    }

    #[test]
    fn views_carry_punctuality() {
        let (mut pool, alice, _, rid) = setup();

        let mut u = upd(rid, true);
        u.actual_start_time = at("2025-03-03T10:04:00+01:00");
        u.actual_end_time = at("2025-03-03T12:20:00+01:00");
        CompletionLogic::upsert(&mut pool, alice, &u).unwrap();

        let views = CompletionLogic::list_for_date(&mut pool, alice, d("2025-03-03"), 10).unwrap();
        let p = views[0].punctuality;
        assert_eq!(views[0].routine.task_name, "Work 1");
        assert_eq!(p.start_delta_minutes, Some(4));
        assert_eq!(p.end_delta_minutes, Some(20));
        assert_eq!(p.start_on_time, Some(true));
        assert_eq!(p.end_on_time, Some(false));
        assert_eq!(p.on_time, Some(false));
    }

    #[test]
    fn completing_someone_elses_routine_is_forbidden() {
        let (mut pool, _, bob, rid) = setup();
        assert!(matches!(
            CompletionLogic::upsert(&mut pool, bob, &upd(rid, true)),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            CompletionLogic::upsert(&mut pool, bob, &upd(rid + 50, true)),
            Err(AppError::NotFound(_))
        ));
    }
}
