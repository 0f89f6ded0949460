use super::open_session;
use crate::cli::parser::{Cli, Commands, ScheduleAction};
use crate::config::Config;
use crate::core::schedule::ScheduleLogic;
use crate::errors::{AppError, AppResult};
use crate::models::day_of_week::DayOfWeek;
use crate::models::schedule::ScheduleInput;
use crate::ui::messages::{header, info, success};
use crate::utils::date::today;
use crate::utils::table::{Column, Table};
use chrono::Datelike;

/// `0`-`6`, a day name (`mon`, `Tuesday`), or `today`.
fn parse_day(raw: &str) -> AppResult<DayOfWeek> {
    if raw.trim().eq_ignore_ascii_case("today") {
        return Ok(DayOfWeek::from(today().weekday()));
    }
    DayOfWeek::from_input(raw).ok_or_else(|| AppError::InvalidDayOfWeek(raw.to_string()))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule { action } = &cli.command else {
        return Ok(());
    };
    let (mut pool, user) = open_session(cli, cfg)?;

    match action {
        ScheduleAction::Add { routine_id, day } => {
            let day = parse_day(day)?;
            let input = ScheduleInput {
                routine_id: Some(*routine_id),
                day_of_week: Some(day.to_db()),
            };
            let s = ScheduleLogic::create(&mut pool, user.id, &input)?;
            let name = s.routine.as_ref().map(|r| r.task_name.as_str()).unwrap_or("?");
            success(format!("Schedule #{}: '{}' on {}", s.id, name, s.day_of_week));
        }

        ScheduleAction::List { day: Some(day) } => {
            let day = parse_day(day)?;
            let routines = ScheduleLogic::routines_for_day(&mut pool, user.id, day)?;
            header(format!("Routine for {}", day));
            if routines.is_empty() {
                info("Nothing scheduled.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::new("Start", 9),
                Column::new("End", 9),
                Column::new("Task", 24),
            ]);
            for r in routines {
                table.add_row(vec![r.start_time, r.end_time, r.task_name]);
            }
            print!("{}", table.render());
        }

        ScheduleAction::List { day: None } => {
            let schedules = ScheduleLogic::list(&mut pool, user.id, None)?;
            if schedules.is_empty() {
                info("No schedules yet.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Day", 10),
                Column::new("Routine", 8),
                Column::new("Task", 24),
                Column::new("Start", 9),
            ]);
            for s in schedules {
                let (task, start) = s
                    .routine
                    .map(|r| (r.task_name, r.start_time))
                    .unwrap_or_default();
                table.add_row(vec![
                    s.id.to_string(),
                    s.day_of_week.to_string(),
                    s.routine_id.to_string(),
                    task,
                    start,
                ]);
            }
            print!("{}", table.render());
        }

        ScheduleAction::Del { id } => {
            let s = ScheduleLogic::delete(&mut pool, user.id, *id)?;
            success(format!("Schedule #{} ({}) removed", s.id, s.day_of_week));
        }
    }

    Ok(())
}
