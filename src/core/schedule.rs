use crate::core::routine::{owned_routine, sort_by_start};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::schedules::{
    delete_schedule, find_by_routine_and_day, find_schedule, insert_schedule, load_schedules,
};
use crate::errors::{AppError, AppResult};
use crate::models::day_of_week::DayOfWeek;
use crate::models::routine::Routine;
use crate::models::schedule::{RoutineSchedule, ScheduleInput};

pub struct ScheduleLogic;

impl ScheduleLogic {
    pub fn list(
        pool: &mut DbPool,
        user_id: i64,
        day: Option<DayOfWeek>,
    ) -> AppResult<Vec<RoutineSchedule>> {
        load_schedules(&pool.conn, user_id, day)
    }

    /// Routines scheduled on `day`, ordered by start time.
    pub fn routines_for_day(
        pool: &mut DbPool,
        user_id: i64,
        day: DayOfWeek,
    ) -> AppResult<Vec<Routine>> {
        let mut routines: Vec<Routine> = load_schedules(&pool.conn, user_id, Some(day))?
            .into_iter()
            .filter_map(|s| s.routine)
            .collect();
        sort_by_start(&mut routines);
        Ok(routines)
    }

    /// Assign a routine to a day. Assigning it twice to the same day returns
    /// the existing assignment.
    pub fn create(
        pool: &mut DbPool,
        user_id: i64,
        input: &ScheduleInput,
    ) -> AppResult<RoutineSchedule> {
        let (routine_id, raw_day) = match (input.routine_id, input.day_of_week) {
            (Some(r), Some(d)) => (r, d),
            (None, Some(_)) => return Err(AppError::MissingFields("routine_id".into())),
            (Some(_), None) => return Err(AppError::MissingFields("day_of_week".into())),
            (None, None) => {
                return Err(AppError::MissingFields("routine_id, day_of_week".into()));
            }
        };
        let day = DayOfWeek::try_from(raw_day)?;

        let routine = owned_routine(&pool.conn, user_id, routine_id)?;

        if let Some(existing) = find_by_routine_and_day(&pool.conn, routine_id, day)? {
            return Ok(existing);
        }

        let id = insert_schedule(&pool.conn, user_id, routine_id, day)?;

        ttlog(
            &pool.conn,
            "schedule",
            &format!("routine#{}", routine_id),
            &format!("'{}' on {}", routine.task_name, day),
        )?;

        find_schedule(&pool.conn, id)?.ok_or_else(|| AppError::NotFound("Schedule".into()))
    }

    pub fn delete(pool: &mut DbPool, user_id: i64, id: i64) -> AppResult<RoutineSchedule> {
        let schedule =
            find_schedule(&pool.conn, id)?.ok_or_else(|| AppError::NotFound("Schedule".into()))?;
        if schedule.user_id != user_id {
            return Err(AppError::Forbidden("Schedule".into()));
        }

        delete_schedule(&pool.conn, id)?;

        ttlog(
            &pool.conn,
            "unschedule",
            &format!("schedule#{}", id),
            &format!("routine#{} on {}", schedule.routine_id, schedule.day_of_week),
        )?;

        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::routines::insert_routine;
    use crate::db::users::insert_user;
    use crate::models::routine::RoutineDraft;

    fn setup() -> (DbPool, i64, i64) {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let alice = insert_user(&pool.conn, "alice").unwrap().id;
        let bob = insert_user(&pool.conn, "bob").unwrap().id;
        (pool, alice, bob)
    }

    fn input(routine_id: i64, day: i64) -> ScheduleInput {
        ScheduleInput {
            routine_id: Some(routine_id),
            day_of_week: Some(day),
        }
    }

    #[test]
    fn day_must_be_in_range() {
        let (mut pool, alice, _) = setup();
        let r = insert_routine(&pool.conn, alice, &RoutineDraft::new("Gym", "6:00 PM", "7:00 PM"))
            .unwrap();

        for bad in [-1, 7, 42] {
            assert!(matches!(
                ScheduleLogic::create(&mut pool, alice, &input(r.id, bad)),
                Err(AppError::InvalidDayOfWeek(_))
            ));
        }
        let s = ScheduleLogic::create(&mut pool, alice, &input(r.id, 6)).unwrap();
        assert_eq!(s.day_of_week, DayOfWeek::Saturday);
    }

    #[test]
    fn duplicate_assignment_returns_existing_row() {
        let (mut pool, alice, _) = setup();
        let r = insert_routine(&pool.conn, alice, &RoutineDraft::new("Gym", "6:00 PM", "7:00 PM"))
            .unwrap();

        let first = ScheduleLogic::create(&mut pool, alice, &input(r.id, 1)).unwrap();
        let second = ScheduleLogic::create(&mut pool, alice, &input(r.id, 1)).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(ScheduleLogic::list(&mut pool, alice, None).unwrap().len(), 1);
    }

    #[test]
    fn foreign_routines_cannot_be_scheduled_or_unscheduled() {
        let (mut pool, alice, bob) = setup();
        let r = insert_routine(&pool.conn, alice, &RoutineDraft::new("Gym", "6:00 PM", "7:00 PM"))
            .unwrap();

        assert!(matches!(
            ScheduleLogic::create(&mut pool, bob, &input(r.id, 1)),
            Err(AppError::Forbidden(_))
        ));

        let s = ScheduleLogic::create(&mut pool, alice, &input(r.id, 1)).unwrap();
        assert!(matches!(
            ScheduleLogic::delete(&mut pool, bob, s.id),
            Err(AppError::Forbidden(_))
        ));
        ScheduleLogic::delete(&mut pool, alice, s.id).unwrap();
        assert!(matches!(
            ScheduleLogic::delete(&mut pool, alice, s.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn day_filter_and_ordering() {
        let (mut pool, alice, _) = setup();
        let late = insert_routine(&pool.conn, alice, &RoutineDraft::new("Read", "9:00 PM", "10:00 PM"))
            .unwrap();
        let early = insert_routine(&pool.conn, alice, &RoutineDraft::new("Run", "6:00 AM", "7:00 AM"))
            .unwrap();
        ScheduleLogic::create(&mut pool, alice, &input(late.id, 2)).unwrap();
        ScheduleLogic::create(&mut pool, alice, &input(early.id, 2)).unwrap();
        ScheduleLogic::create(&mut pool, alice, &input(early.id, 3)).unwrap();

        let tuesday = ScheduleLogic::list(&mut pool, alice, Some(DayOfWeek::Tuesday)).unwrap();
        assert_eq!(tuesday.len(), 2);
        assert!(tuesday.iter().all(|s| s.routine.is_some()));

        let names: Vec<String> = ScheduleLogic::routines_for_day(&mut pool, alice, DayOfWeek::Tuesday)
            .unwrap()
            .into_iter()
            .map(|r| r.task_name)
            .collect();
        assert_eq!(names, ["Run", "Read"]);
    }

    #[test]
    fn deleting_a_routine_drops_its_schedules() {
        let (mut pool, alice, _) = setup();
        let r = insert_routine(&pool.conn, alice, &RoutineDraft::new("Gym", "6:00 PM", "7:00 PM"))
            .unwrap();
        ScheduleLogic::create(&mut pool, alice, &input(r.id, 1)).unwrap();
        crate::core::routine::RoutineLogic::delete(&mut pool, alice, r.id).unwrap();
        assert!(ScheduleLogic::list(&mut pool, alice, None).unwrap().is_empty());
    }
}
