//! JSON API over the routine store.
//!
//! ## Endpoints
//!
//! - `GET /healthz` liveness, no auth
//! - `/api/routines` list, create, `reset`, and per-id get/update/delete
//! - `/api/routine-schedules` list (`?day=`), create, delete
//! - `/api/completions` list for `?date=`, upsert
//! - `/api/performance` weekly report, `/api/performance/timing` on-time stats
//!
//! Every `/api` route resolves the caller from `Authorization: Bearer <token>`.

pub mod auth;
pub mod completions;
pub mod error;
pub mod performance;
pub(crate) mod request_tracing;
pub mod routines;
pub mod schedules;

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{delete, get, post};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;

/// Shared server state. The single SQLite connection is serialized behind a
/// mutex and only ever touched from the blocking pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<DbPool>>,
    pub grace_minutes: i64,
}

impl AppState {
    pub fn new(pool: DbPool, grace_minutes: i64) -> Self {
        Self {
            db: Arc::new(Mutex::new(pool)),
            grace_minutes,
        }
    }

    /// Run a store operation on the blocking pool.
    pub async fn run<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut DbPool) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            // A panicking store call leaves no half-applied SQL behind: an open
            // transaction rolls back when dropped, so the connection stays usable.
            let mut pool = db.lock().unwrap_or_else(|poisoned| {
                tracing::warn!("recovering database lock after a panicked request");
                db.clear_poison();
                poisoned.into_inner()
            });
            f(&mut pool)
        })
        .await
        .map_err(|e| AppError::Server(format!("store task failed: {e}")))?
    }
}

async fn healthz() -> axum::Json<Value> {
    axum::Json(json!({ "status": "ok" }))
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/routines", get(routines::list).post(routines::create))
        .route("/routines/reset", post(routines::reset))
        .route(
            "/routines/{id}",
            get(routines::get)
                .put(routines::update)
                .delete(routines::delete),
        )
        .route(
            "/routine-schedules",
            get(schedules::list).post(schedules::create),
        )
        .route("/routine-schedules/{id}", delete(schedules::delete))
        .route(
            "/completions",
            get(completions::list).post(completions::upsert),
        )
        .route("/performance", get(performance::weekly))
        .route("/performance/timing", get(performance::timing));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api)
        .layer(from_fn(request_tracing::request_tracing_middleware))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("bind {addr} failed: {e}")))?;

    let local = listener
        .local_addr()
        .map_err(|e| AppError::Server(format!("failed to get local addr: {e}")))?;

    info!("routinely API listening on http://{local}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}
