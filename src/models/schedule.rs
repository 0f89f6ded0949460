use super::day_of_week::DayOfWeek;
use super::routine::Routine;
use serde::{Deserialize, Serialize};

/// Assignment of a routine to one day of the week.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoutineSchedule {
    pub id: i64,
    pub user_id: i64,
    pub routine_id: i64,
    pub day_of_week: DayOfWeek,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine: Option<Routine>,
}

/// Body of a schedule creation request. `day_of_week` is validated by
/// `core::schedule`, so any integer is accepted here.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleInput {
    #[serde(default, alias = "routineId")]
    pub routine_id: Option<i64>,
    #[serde(default, alias = "dayOfWeek")]
    pub day_of_week: Option<i64>,
}
