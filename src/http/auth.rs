use super::AppState;
use crate::db::users::find_by_token;
use crate::errors::AppError;
use crate::models::user::User;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The user behind the request's `Authorization: Bearer <token>` header.
pub struct AuthUser(pub User);

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthenticated)?;

        let user = state
            .run(move |pool| find_by_token(&pool.conn, &token))
            .await?;

        user.map(AuthUser).ok_or(AppError::Unauthenticated)
    }
}
