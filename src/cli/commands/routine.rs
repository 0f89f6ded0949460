use super::open_session;
use crate::cli::parser::{Cli, Commands, RoutineAction};
use crate::config::Config;
use crate::core::routine::RoutineLogic;
use crate::errors::AppResult;
use crate::models::routine::{Routine, RoutineInput};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::{Column, Table};
use std::io::{self, Write};

fn print_routines(routines: &[Routine]) {
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("Task", 24),
        Column::new("Start", 9),
        Column::new("End", 9),
    ]);
    for r in routines {
        table.add_row(vec![
            r.id.to_string(),
            r.task_name.clone(),
            r.start_time.clone(),
            r.end_time.clone(),
        ]);
    }
    print!("{}", table.render());
}

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Routine { action } = &cli.command else {
        return Ok(());
    };
    let (mut pool, user) = open_session(cli, cfg)?;

    match action {
        RoutineAction::Add { name, start, end } => {
            let input = RoutineInput {
                task_name: Some(name.clone()),
                start_time: Some(start.clone()),
                end_time: Some(end.clone()),
            };
            let r = RoutineLogic::create(&mut pool, user.id, &input)?;
            success(format!(
                "Routine #{} '{}' added ({} - {})",
                r.id, r.task_name, r.start_time, r.end_time
            ));
        }

        RoutineAction::List => {
            let routines = RoutineLogic::list(&mut pool, user.id)?;
            if routines.is_empty() {
                info("No routines yet. Add one with `routinely routine add` or run `routinely routine reset`.");
            } else {
                print_routines(&routines);
            }
        }

        RoutineAction::Edit {
            id,
            name,
            start,
            end,
        } => {
            let current = RoutineLogic::get(&mut pool, user.id, *id)?;
            let input = RoutineInput {
                task_name: Some(name.clone().unwrap_or(current.task_name)),
                start_time: Some(start.clone().unwrap_or(current.start_time)),
                end_time: Some(end.clone().unwrap_or(current.end_time)),
            };
            let r = RoutineLogic::update(&mut pool, user.id, *id, &input)?;
            success(format!(
                "Routine #{} updated: '{}' ({} - {})",
                r.id, r.task_name, r.start_time, r.end_time
            ));
        }

        RoutineAction::Del { id } => {
            let r = RoutineLogic::delete(&mut pool, user.id, *id)?;
            success(format!("Routine #{} '{}' deleted", r.id, r.task_name));
        }

        RoutineAction::Reset { yes } => {
            if !*yes && !confirm("Delete all your routines and restore the default day?")? {
                warning("Reset cancelled.");
                return Ok(());
            }
            let routines = RoutineLogic::reset(&mut pool, user.id)?;
            success(format!("Restored {} default routines", routines.len()));
            print_routines(&routines);
        }
    }

    Ok(())
}
