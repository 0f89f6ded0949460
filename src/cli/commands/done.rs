use super::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::completion::CompletionLogic;
use crate::errors::AppResult;
use crate::models::completion::CompletionUpdate;
use crate::ui::messages::success;
use crate::utils::date::{date_str, parse_date_or_today};
use crate::utils::time::parse_optional_entry;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Done {
        routine_id,
        date,
        start,
        end,
        undo,
    } = &cli.command
    {
        let date = parse_date_or_today(date.as_deref())?;
        let update = CompletionUpdate {
            routine_id: *routine_id,
            date,
            completed: !*undo,
            actual_start_time: parse_optional_entry(start.as_ref(), date)?,
            actual_end_time: parse_optional_entry(end.as_ref(), date)?,
        };

        let (mut pool, user) = open_session(cli, cfg)?;
        let c = CompletionLogic::upsert(&mut pool, user.id, &update)?;

        let verb = if c.completed { "done" } else { "not done" };
        success(format!(
            "Routine #{} marked {} for {}",
            c.routine_id,
            verb,
            date_str(c.date)
        ));
    }

    Ok(())
}
