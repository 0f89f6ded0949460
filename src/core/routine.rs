use crate::core::defaults::default_routine;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::routines::{
    delete_all_routines, delete_routine, find_routine, insert_routine, load_routines,
    update_routine,
};
use crate::errors::{AppError, AppResult};
use crate::models::routine::{Routine, RoutineDraft, RoutineInput};
use crate::utils::time::sort_key;
use rusqlite::Connection;

/// Check that all three fields are present and non-blank.
pub fn validate(input: &RoutineInput) -> AppResult<RoutineDraft> {
    fn field(v: &Option<String>) -> Option<String> {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    let name = field(&input.task_name);
    let start = field(&input.start_time);
    let end = field(&input.end_time);

    match (name, start, end) {
        (Some(task_name), Some(start_time), Some(end_time)) => Ok(RoutineDraft {
            task_name,
            start_time,
            end_time,
        }),
        (name, start, end) => {
            let missing: Vec<&str> = [
                ("task_name", name.is_none()),
                ("start_time", start.is_none()),
                ("end_time", end.is_none()),
            ]
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(k, _)| *k)
            .collect();
            Err(AppError::MissingFields(missing.join(", ")))
        }
    }
}

/// Load a routine and make sure `user_id` owns it.
pub fn owned_routine(conn: &Connection, user_id: i64, id: i64) -> AppResult<Routine> {
    let routine = find_routine(conn, id)?.ok_or_else(|| AppError::NotFound("Routine".into()))?;
    if routine.user_id != user_id {
        return Err(AppError::Forbidden("Routine".into()));
    }
    Ok(routine)
}

/// Order by scheduled start time of day; unparseable times last, then by id.
pub fn sort_by_start(routines: &mut [Routine]) {
    routines.sort_by_key(|r| (sort_key(&r.start_time), r.id));
}

pub struct RoutineLogic;

impl RoutineLogic {
    pub fn list(pool: &mut DbPool, user_id: i64) -> AppResult<Vec<Routine>> {
        let mut routines = load_routines(&pool.conn, user_id)?;
        sort_by_start(&mut routines);
        Ok(routines)
    }

    pub fn get(pool: &mut DbPool, user_id: i64, id: i64) -> AppResult<Routine> {
        owned_routine(&pool.conn, user_id, id)
    }

    pub fn create(pool: &mut DbPool, user_id: i64, input: &RoutineInput) -> AppResult<Routine> {
        let draft = validate(input)?;
        let routine = insert_routine(&pool.conn, user_id, &draft)?;

        ttlog(
            &pool.conn,
            "add",
            &format!("routine#{}", routine.id),
            &format!(
                "{} ({} - {})",
                routine.task_name, routine.start_time, routine.end_time
            ),
        )?;

        Ok(routine)
    }

    pub fn update(
        pool: &mut DbPool,
        user_id: i64,
        id: i64,
        input: &RoutineInput,
    ) -> AppResult<Routine> {
        owned_routine(&pool.conn, user_id, id)?;
        let draft = validate(input)?;

        update_routine(&pool.conn, id, &draft)?;
        let updated = owned_routine(&pool.conn, user_id, id)?;

        ttlog(
            &pool.conn,
            "edit",
            &format!("routine#{}", id),
            &format!(
                "{} ({} - {})",
                updated.task_name, updated.start_time, updated.end_time
            ),
        )?;

        Ok(updated)
    }

    pub fn delete(pool: &mut DbPool, user_id: i64, id: i64) -> AppResult<Routine> {
        let routine = owned_routine(&pool.conn, user_id, id)?;
        delete_routine(&pool.conn, id)?;

        ttlog(
            &pool.conn,
            "del",
            &format!("routine#{}", id),
            &format!("Deleted '{}'", routine.task_name),
        )?;

        Ok(routine)
    }

    /// Replace all of a user's routines with the default template.
    ///
    /// Runs in one transaction: on failure the previous routines survive.
    pub fn reset(pool: &mut DbPool, user_id: i64) -> AppResult<Vec<Routine>> {
        let tx = pool.conn.transaction()?;

        let removed = delete_all_routines(&tx, user_id)?;
        let mut created = Vec::new();
        for draft in default_routine() {
            created.push(insert_routine(&tx, user_id, &draft)?);
        }

        ttlog(
            &tx,
            "reset",
            &format!("user#{}", user_id),
            &format!(
                "Removed {} routines, restored {} defaults",
                removed,
                created.len()
            ),
        )?;

        tx.commit()?;

        sort_by_start(&mut created);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::defaults::DEFAULT_ROUTINE;
    use crate::db::initialize::init_db;
    use crate::db::users::insert_user;

    fn setup() -> (DbPool, i64, i64) {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let alice = insert_user(&pool.conn, "alice").unwrap().id;
        let bob = insert_user(&pool.conn, "bob").unwrap().id;
        (pool, alice, bob)
    }

    fn input(name: &str, start: &str, end: &str) -> RoutineInput {
        RoutineInput {
            task_name: Some(name.into()),
            start_time: Some(start.into()),
            end_time: Some(end.into()),
        }
    }

    #[test]
    fn blank_fields_are_reported() {
        let err = validate(&RoutineInput {
            task_name: Some("  ".into()),
            start_time: Some("8:00 AM".into()),
            end_time: None,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: task_name, end_time");
    }

    #[test]
    fn list_is_ordered_by_time_of_day() {
        let (mut pool, alice, _) = setup();
        RoutineLogic::create(&mut pool, alice, &input("Dinner", "7:00 PM", "8:00 PM")).unwrap();
        RoutineLogic::create(&mut pool, alice, &input("Whenever", "later", "later")).unwrap();
        RoutineLogic::create(&mut pool, alice, &input("Wake", "6:30 AM", "7:00 AM")).unwrap();
        RoutineLogic::create(&mut pool, alice, &input("Lunch", "12:00 PM", "1:00 PM")).unwrap();

        let names: Vec<String> = RoutineLogic::list(&mut pool, alice)
            .unwrap()
            .into_iter()
            .map(|r| r.task_name)
            .collect();
        assert_eq!(names, ["Wake", "Lunch", "Dinner", "Whenever"]);
    }

    #[test]
    fn other_users_cannot_touch_a_routine() {
        let (mut pool, alice, bob) = setup();
        let r = RoutineLogic::create(&mut pool, alice, &input("Gym", "12:00 PM", "2:00 PM")).unwrap();

        assert!(matches!(
            RoutineLogic::update(&mut pool, bob, r.id, &input("Nap", "1:00 PM", "2:00 PM")),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            RoutineLogic::delete(&mut pool, bob, r.id),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            RoutineLogic::get(&mut pool, bob, r.id),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            RoutineLogic::delete(&mut pool, alice, r.id + 100),
            Err(AppError::NotFound(_))
        ));

        let still = RoutineLogic::get(&mut pool, alice, r.id).unwrap();
        assert_eq!(still.task_name, "Gym");
    }

    #[test]
    fn update_replaces_fields() {
        let (mut pool, alice, _) = setup();
        let r = RoutineLogic::create(&mut pool, alice, &input("Gym", "12:00 PM", "2:00 PM")).unwrap();
        let u = RoutineLogic::update(&mut pool, alice, r.id, &input("Run", "6:00 AM", "7:00 AM"))
            .unwrap();
        assert_eq!(u.id, r.id);
        assert_eq!(u.task_name, "Run");
        assert_eq!(u.start_time, "6:00 AM");
        assert_eq!(u.created_at, r.created_at);
    }

    #[test]
    fn reset_restores_exactly_the_template() {
        let (mut pool, alice, bob) = setup();
        RoutineLogic::create(&mut pool, alice, &input("Custom", "9:00 AM", "9:30 AM")).unwrap();
        let bobs = RoutineLogic::create(&mut pool, bob, &input("Bob's", "9:00 AM", "9:30 AM")).unwrap();

        RoutineLogic::reset(&mut pool, alice).unwrap();

        let got: Vec<(String, String, String)> = RoutineLogic::list(&mut pool, alice)
            .unwrap()
            .into_iter()
            .map(|r| (r.task_name, r.start_time, r.end_time))
            .collect();
        let expected: Vec<(String, String, String)> = DEFAULT_ROUTINE
            .iter()
            .map(|(n, s, e)| (n.to_string(), s.to_string(), e.to_string()))
            .collect();
        assert_eq!(got, expected);

        // other users are untouched
        let bob_list = RoutineLogic::list(&mut pool, bob).unwrap();
        assert_eq!(bob_list, vec![bobs]);
    }
}
