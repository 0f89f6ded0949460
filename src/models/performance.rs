use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion percentage for one weekday.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyCompletion {
    pub date: NaiveDate,
    pub day: String,
    pub completed: usize,
    pub completion_percentage: i64,
}

/// Monday–Friday completion figures for one week.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeeklyPerformance {
    pub week_start: NaiveDate,
    pub total_routines: usize,
    pub weekly_data: Vec<DailyCompletion>,
    pub weekly_average: i64,
}

/// On-time versus late counts over a trailing window.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimeComparisonStats {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub on_time_count: usize,
    pub late_count: usize,
    pub total_completed_count: usize,
    pub on_time_percentage: i64,
}

/// Trailing window for timing statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    /// Last 7 days
    #[default]
    Week,
    /// Last 30 days
    Month,
}

impl TimeFrame {
    pub fn days(&self) -> i64 {
        match self {
            TimeFrame::Week => 7,
            TimeFrame::Month => 30,
        }
    }
}
