use serde::{Deserialize, Serialize};

/// A named task scheduled between two times of day.
///
/// Start and end are kept exactly as entered (e.g. `"8:00 AM"`); they are
/// parsed only when punctuality is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Routine {
    pub id: i64,
    pub user_id: i64,
    pub task_name: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields accepted when creating or editing a routine.
///
/// Both snake_case and camelCase spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutineInput {
    #[serde(default, alias = "taskName")]
    pub task_name: Option<String>,
    #[serde(default, alias = "startTime")]
    pub start_time: Option<String>,
    #[serde(default, alias = "endTime")]
    pub end_time: Option<String>,
}

/// A validated routine definition (all fields present and non-blank).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineDraft {
    pub task_name: String,
    pub start_time: String,
    pub end_time: String,
}

impl RoutineDraft {
    pub fn new(task_name: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            task_name: task_name.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}
