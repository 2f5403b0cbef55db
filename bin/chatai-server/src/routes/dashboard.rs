use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::entities::ProjectStore;
use crate::error::ServerError;
use crate::middleware::auth::AuthUser;
use crate::schemas::project::{DashboardResponse, ProjectResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_dashboard), components(schemas(DashboardResponse, ProjectResponse)))]
pub struct DashboardApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// The caller's projects with project and message totals.
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "projects",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 401, description = "Missing x-user-id header"),
    )
)]
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<DashboardResponse>, ServerError> {
    let projects = state.store.list_projects(user.id()).await?;
    let total_messages = state.store.count_messages_for_user(user.id()).await?;
    Ok(Json(DashboardResponse {
        total_projects: projects.len(),
        projects: projects.iter().map(|p| p.to_response()).collect(),
        total_messages,
    }))
}
