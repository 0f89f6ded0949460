use super::AppState;
use super::auth::AuthUser;
use super::error::{ApiJson, ApiQuery};
use crate::core::completion::{CompletionLogic, validate};
use crate::errors::AppResult;
use crate::models::completion::{CompletionInput, CompletionView, TaskCompletion};
use crate::utils::date::parse_date_or_today;
use axum::Json;
use axum::extract::State;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// `GET /api/completions?date=YYYY-MM-DD` (today when omitted)
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> AppResult<Json<Vec<CompletionView>>> {
    let date = parse_date_or_today(query.date.as_deref())?;
    let grace = state.grace_minutes;
    let views = state
        .run(move |pool| CompletionLogic::list_for_date(pool, user.id, date, grace))
        .await?;
    Ok(Json(views))
}

/// `POST /api/completions`
pub async fn upsert(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(input): ApiJson<CompletionInput>,
) -> AppResult<Json<TaskCompletion>> {
    let update = validate(&input)?;
    let completion = state
        .run(move |pool| CompletionLogic::upsert(pool, user.id, &update))
        .await?;
    Ok(Json(completion))
}
