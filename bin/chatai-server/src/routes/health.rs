//! Liveness plus database reachability.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::warn;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// `200 {"status":"ok", ...}` when the database answers, `503` with
/// `"status":"degraded"` otherwise. Never requires `x-user-id`.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server and database reachable", body = Value),
        (status = 503, description = "Database unreachable", body = Value),
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let (status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!(error = %e, "health check: database unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };
    let overall = if status == StatusCode::OK { "ok" } else { "degraded" };
    (
        status,
        Json(json!({
            "status": overall,
            "database": database,
            "version": env!("CARGO_PKG_VERSION"),
            "mock_mode": state.ai.config().is_sandboxed(),
        })),
    )
}
