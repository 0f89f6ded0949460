use super::routine::Routine;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Whether (and when) a routine was performed on a given date.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskCompletion {
    pub id: i64,
    pub user_id: i64,
    pub routine_id: i64,
    pub date: NaiveDate, // ⇔ task_completions.date (TEXT "YYYY-MM-DD")
    pub completed: bool,
    pub actual_start_time: Option<DateTime<FixedOffset>>, // RFC 3339
    pub actual_end_time: Option<DateTime<FixedOffset>>,   // RFC 3339
    pub created_at: String,
}

/// Body of a completion upsert. A missing `completed` means `false`;
/// missing actual times keep whatever is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionInput {
    #[serde(default, alias = "routineId")]
    pub routine_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, alias = "actualStartTime")]
    pub actual_start_time: Option<DateTime<FixedOffset>>,
    #[serde(default, alias = "actualEndTime")]
    pub actual_end_time: Option<DateTime<FixedOffset>>,
}

/// Validated completion update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionUpdate {
    pub routine_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
    pub actual_start_time: Option<DateTime<FixedOffset>>,
    pub actual_end_time: Option<DateTime<FixedOffset>>,
}

/// Punctuality of one completion against its routine's schedule.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Punctuality {
    pub start_delta_minutes: Option<i64>,
    pub end_delta_minutes: Option<i64>,
    pub start_on_time: Option<bool>,
    pub end_on_time: Option<bool>,
    pub on_time: Option<bool>,
}

/// A completion joined with its routine and punctuality evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionView {
    #[serde(flatten)]
    pub completion: TaskCompletion,
    pub routine: Routine,
    pub punctuality: Punctuality,
}
