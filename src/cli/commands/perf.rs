use super::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::performance::PerformanceLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{color_for_percentage, paint};
use crate::utils::date::{date_str, parse_date_or_today};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Perf { date } = &cli.command {
        let date = parse_date_or_today(date.as_deref())?;
        let (mut pool, user) = open_session(cli, cfg)?;

        let report = PerformanceLogic::weekly(&mut pool, user.id, date)?;

        header(format!("Week of {}", date_str(report.week_start)));

        let mut table = Table::new(vec![
            Column::new("Day", 10),
            Column::new("Date", 10),
            Column::new("Done", 7),
            Column::new("%", 5),
        ]);
        for d in &report.weekly_data {
            table.add_row(vec![
                d.day.clone(),
                date_str(d.date),
                format!("{}/{}", d.completed, report.total_routines),
                paint(
                    &format!("{}%", d.completion_percentage),
                    color_for_percentage(d.completion_percentage),
                ),
            ]);
        }
        print!("{}", table.render());

        println!(
            "\nWeekly average: {}",
            paint(
                &format!("{}%", report.weekly_average),
                color_for_percentage(report.weekly_average)
            )
        );
    }

    Ok(())
}
