use super::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::performance::PerformanceLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, RED, color_for_percentage, paint};
use crate::utils::date::{date_str, today};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Timing { frame } = &cli.command {
        let (mut pool, user) = open_session(cli, cfg)?;

        let stats =
            PerformanceLogic::timing(&mut pool, user.id, *frame, today(), cfg.grace_minutes)?;

        header(format!(
            "Timing {} → {} (±{} min)",
            date_str(stats.from),
            date_str(stats.to),
            cfg.grace_minutes
        ));

        println!("On time : {}", paint(&stats.on_time_count.to_string(), GREEN));
        println!("Late    : {}", paint(&stats.late_count.to_string(), RED));
        println!("Timed   : {}", stats.total_completed_count);
        println!(
            "Score   : {}",
            paint(
                &format!("{}%", stats.on_time_percentage),
                color_for_percentage(stats.on_time_percentage)
            )
        );
    }

    Ok(())
}
