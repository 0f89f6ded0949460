use super::AppState;
use super::auth::AuthUser;
use super::error::{ApiJson, ApiPath};
use crate::core::routine::RoutineLogic;
use crate::errors::AppResult;
use crate::models::routine::{Routine, RoutineInput};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

/// `GET /api/routines`
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<Routine>>> {
    let routines = state.run(move |pool| RoutineLogic::list(pool, user.id)).await?;
    Ok(Json(routines))
}

/// `POST /api/routines`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(input): ApiJson<RoutineInput>,
) -> AppResult<(StatusCode, Json<Routine>)> {
    let routine = state
        .run(move |pool| RoutineLogic::create(pool, user.id, &input))
        .await?;
    Ok((StatusCode::CREATED, Json(routine)))
}

/// `GET /api/routines/{id}`
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Routine>> {
    let routine = state.run(move |pool| RoutineLogic::get(pool, user.id, id)).await?;
    Ok(Json(routine))
}

/// `PUT /api/routines/{id}`
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<RoutineInput>,
) -> AppResult<Json<Routine>> {
    let routine = state
        .run(move |pool| RoutineLogic::update(pool, user.id, id, &input))
        .await?;
    Ok(Json(routine))
}

/// `DELETE /api/routines/{id}`
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state
        .run(move |pool| RoutineLogic::delete(pool, user.id, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/routines/reset`
pub async fn reset(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<Routine>>> {
    let routines = state.run(move |pool| RoutineLogic::reset(pool, user.id)).await?;
    Ok(Json(routines))
}
