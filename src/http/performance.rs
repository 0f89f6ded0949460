use super::AppState;
use super::auth::AuthUser;
use super::completions::DateQuery;
use super::error::ApiQuery;
use crate::core::performance::PerformanceLogic;
use crate::errors::AppResult;
use crate::models::performance::{TimeComparisonStats, TimeFrame, WeeklyPerformance};
use crate::utils::date::{parse_date_or_today, today};
use axum::Json;
use axum::extract::State;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct FrameQuery {
    #[serde(default)]
    pub frame: TimeFrame,
}

/// `GET /api/performance?date=YYYY-MM-DD`
pub async fn weekly(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> AppResult<Json<WeeklyPerformance>> {
    let date = parse_date_or_today(query.date.as_deref())?;
    let report = state
        .run(move |pool| PerformanceLogic::weekly(pool, user.id, date))
        .await?;
    Ok(Json(report))
}

/// `GET /api/performance/timing?frame=week|month`
pub async fn timing(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<FrameQuery>,
) -> AppResult<Json<TimeComparisonStats>> {
    let grace = state.grace_minutes;
    let stats = state
        .run(move |pool| PerformanceLogic::timing(pool, user.id, query.frame, today(), grace))
        .await?;
    Ok(Json(stats))
}
