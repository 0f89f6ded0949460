use super::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::completion::CompletionLogic;
use crate::core::performance::percentage;
use crate::core::routine::RoutineLogic;
use crate::errors::AppResult;
use crate::models::completion::CompletionView;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREEN, GREY, color_for_delta, color_for_percentage, paint};
use crate::utils::date::{date_str, parse_date_or_today};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_delta;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

fn hhmm(t: Option<&DateTime<FixedOffset>>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn delta_cell(delta: Option<i64>) -> String {
    match delta {
        Some(m) => paint(&format_delta(m), color_for_delta(Some(m))),
        None => paint("-", GREY),
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { date } = &cli.command {
        let date = parse_date_or_today(date.as_deref())?;
        let (mut pool, user) = open_session(cli, cfg)?;

        let routines = RoutineLogic::list(&mut pool, user.id)?;
        let views: HashMap<i64, CompletionView> =
            CompletionLogic::list_for_date(&mut pool, user.id, date, cfg.grace_minutes)?
                .into_iter()
                .map(|v| (v.completion.routine_id, v))
                .collect();

        header(format!("{} {}", date.format("%A"), date_str(date)));

        if routines.is_empty() {
            info("No routines yet.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 4),
            Column::new("Task", 22),
            Column::new("Scheduled", 20),
            Column::new("Done", 4),
            Column::new("Actual", 13),
            Column::new("Start", 9),
            Column::new("End", 9),
        ]);

        let mut done = 0;
        for r in &routines {
            let view = views.get(&r.id);
            let completed = view.is_some_and(|v| v.completion.completed);
            if completed {
                done += 1;
            }

            let (actual, start, end) = match view {
                Some(v) => (
                    format!(
                        "{} - {}",
                        hhmm(v.completion.actual_start_time.as_ref()),
                        hhmm(v.completion.actual_end_time.as_ref())
                    ),
                    delta_cell(v.punctuality.start_delta_minutes),
                    delta_cell(v.punctuality.end_delta_minutes),
                ),
                None => (
                    paint("--:-- - --:--", GREY),
                    delta_cell(None),
                    delta_cell(None),
                ),
            };

            table.add_row(vec![
                r.id.to_string(),
                r.task_name.clone(),
                format!("{} - {}", r.start_time, r.end_time),
                if completed { paint("yes", GREEN) } else { paint("no", GREY) },
                actual,
                start,
                end,
            ]);
        }

        print!("{}", table.render());

        let pct = percentage(done, routines.len());
        println!(
            "\nCompleted {}/{} ({})",
            done,
            routines.len(),
            paint(&format!("{}%", pct), color_for_percentage(pct))
        );
    }

    Ok(())
}
