//! Weekly completion figures and on-time statistics.

use crate::core::punctuality;
use crate::db::completions::{count_completed_on, load_completed_between};
use crate::db::pool::DbPool;
use crate::db::routines::count_routines;
use crate::errors::AppResult;
use crate::models::completion::TaskCompletion;
use crate::models::performance::{
    DailyCompletion, TimeComparisonStats, TimeFrame, WeeklyPerformance,
};
use crate::models::routine::Routine;
use crate::utils::date::{trailing_range, week_start, working_week};
use chrono::NaiveDate;

/// `round(part / total * 100)`, 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> i64 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as i64
}

/// Rounded mean of daily percentages, 0 for an empty slice.
pub fn average(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let sum: i64 = values.iter().sum();
    (sum as f64 / values.len() as f64).round() as i64
}

/// Build the Monday–Friday report from per-day completed counts.
pub fn build_weekly(
    date: NaiveDate,
    total_routines: usize,
    completed: &[usize],
) -> AppResult<WeeklyPerformance> {
    let weekly_data: Vec<DailyCompletion> = working_week(date)?
        .into_iter()
        .zip(completed.iter().copied().chain(std::iter::repeat(0)))
        .map(|(day, done)| DailyCompletion {
            date: day,
            day: day.format("%A").to_string(),
            completed: done,
            completion_percentage: percentage(done, total_routines),
        })
        .collect();

    let percentages: Vec<i64> = weekly_data.iter().map(|d| d.completion_percentage).collect();

    Ok(WeeklyPerformance {
        week_start: week_start(date)?,
        total_routines,
        weekly_average: average(&percentages),
        weekly_data,
    })
}

/// Count on-time and late completions among those with both actual times.
pub fn build_timing(
    from: NaiveDate,
    to: NaiveDate,
    entries: &[(TaskCompletion, Routine)],
    grace_minutes: i64,
) -> TimeComparisonStats {
    let mut on_time_count = 0;
    let mut late_count = 0;

    for (completion, routine) in entries {
        if !completion.completed {
            continue;
        }
        match punctuality::evaluate(routine, completion, grace_minutes).on_time {
            Some(true) => on_time_count += 1,
            Some(false) => late_count += 1,
            None => {}
        }
    }

    let total_completed_count = on_time_count + late_count;

    TimeComparisonStats {
        from,
        to,
        on_time_count,
        late_count,
        total_completed_count,
        on_time_percentage: percentage(on_time_count, total_completed_count),
    }
}

pub struct PerformanceLogic;

impl PerformanceLogic {
    pub fn weekly(pool: &mut DbPool, user_id: i64, date: NaiveDate) -> AppResult<WeeklyPerformance> {
        let total = count_routines(&pool.conn, user_id)?;

        let mut completed = Vec::with_capacity(5);
        for day in working_week(date)? {
            completed.push(count_completed_on(&pool.conn, user_id, day)?);
        }

        build_weekly(date, total, &completed)
    }

    pub fn timing(
        pool: &mut DbPool,
        user_id: i64,
        frame: TimeFrame,
        today: NaiveDate,
        grace_minutes: i64,
    ) -> AppResult<TimeComparisonStats> {
        let (from, to) = trailing_range(today, frame.days())?;
        let entries = load_completed_between(&pool.conn, user_id, from, to)?;
        Ok(build_timing(from, to, &entries, grace_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn zero_routines_yield_zero_everywhere() {
        let w = build_weekly(d("2025-03-05"), 0, &[3, 1, 0, 0, 2]).unwrap();
        assert_eq!(w.weekly_data.len(), 5);
        assert!(w.weekly_data.iter().all(|d| d.completion_percentage == 0));
        assert_eq!(w.weekly_average, 0);
    }

    #[test]
    fn daily_percentage_is_rounded_ratio() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(9, 9), 100);
        for n in 1..=12usize {
            for k in 0..=n {
                let expected = ((k as f64 / n as f64) * 100.0).round() as i64;
                assert_eq!(percentage(k, n), expected);
            }
        }
    }

    #[test]
    fn week_runs_monday_to_friday_with_rounded_average() {
        let w = build_weekly(d("2025-03-09"), 3, &[3, 2, 1, 0, 1]).unwrap();
        assert_eq!(w.week_start, d("2025-03-03"));
        let days: Vec<&str> = w.weekly_data.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]);
        let pct: Vec<i64> = w.weekly_data.iter().map(|d| d.completion_percentage).collect();
        assert_eq!(pct, [100, 67, 33, 0, 33]);
        // (100 + 67 + 33 + 0 + 33) / 5 = 46.6
        assert_eq!(w.weekly_average, 47);
    }

    fn at(s: &str) -> Option<DateTime<FixedOffset>> {
        Some(DateTime::parse_from_rfc3339(s).unwrap())
    }

    fn entry(
        start: Option<DateTime<FixedOffset>>,
        end: Option<DateTime<FixedOffset>>,
    ) -> (TaskCompletion, Routine) {
        (
            TaskCompletion {
                id: 0,
                user_id: 1,
                routine_id: 1,
                date: d("2025-03-03"),
                completed: true,
                actual_start_time: start,
                actual_end_time: end,
                created_at: String::new(),
            },
            Routine {
                id: 1,
                user_id: 1,
                task_name: "Work 1".into(),
                start_time: "10:00 AM".into(),
                end_time: "12:00 PM".into(),
                created_at: String::new(),
                updated_at: String::new(),
            },
        )
    }

    #[test]
    fn timing_counts_only_fully_timed_completions() {
        let entries = vec![
            entry(at("2025-03-03T10:02:00Z"), at("2025-03-03T12:05:00Z")),
            entry(at("2025-03-03T10:30:00Z"), at("2025-03-03T12:00:00Z")),
            entry(at("2025-03-03T10:00:00Z"), None),
            entry(at("2025-03-03T09:55:00Z"), at("2025-03-03T11:51:00Z")),
        ];
        let s = build_timing(d("2025-02-24"), d("2025-03-03"), &entries, 10);
        assert_eq!(s.on_time_count, 2);
        assert_eq!(s.late_count, 1);
        assert_eq!(s.total_completed_count, 3);
        assert_eq!(s.on_time_percentage, 67);

        let empty = build_timing(d("2025-02-24"), d("2025-03-03"), &[], 10);
        assert_eq!(empty.on_time_percentage, 0);
    }
}
