use super::AppState;
use super::auth::AuthUser;
use super::error::{ApiJson, ApiPath, ApiQuery};
use crate::core::schedule::ScheduleLogic;
use crate::errors::{AppError, AppResult};
use crate::models::day_of_week::DayOfWeek;
use crate::models::schedule::{RoutineSchedule, ScheduleInput};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub day: Option<String>,
}

fn parse_day(raw: Option<&str>) -> AppResult<Option<DayOfWeek>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => {
            let n: i64 = s
                .parse()
                .map_err(|_| AppError::InvalidDayOfWeek(s.to_string()))?;
            Ok(Some(DayOfWeek::try_from(n)?))
        }
    }
}

/// `GET /api/routine-schedules?day=0..6`
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<DayQuery>,
) -> AppResult<Json<Vec<RoutineSchedule>>> {
    let day = parse_day(query.day.as_deref())?;
    let schedules = state
        .run(move |pool| ScheduleLogic::list(pool, user.id, day))
        .await?;
    Ok(Json(schedules))
}

/// `POST /api/routine-schedules`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(input): ApiJson<ScheduleInput>,
) -> AppResult<(StatusCode, Json<RoutineSchedule>)> {
    let schedule = state
        .run(move |pool| ScheduleLogic::create(pool, user.id, &input))
        .await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// `DELETE /api/routine-schedules/{id}`
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state
        .run(move |pool| ScheduleLogic::delete(pool, user.id, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
