use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::entities::MessageStore;
use crate::error::ServerError;
use crate::middleware::auth::AuthUser;
use crate::schemas::message::MessageResponse;
use crate::services::project::owned_project;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(list_messages), components(schemas(MessageResponse)))]
pub struct MessagesApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/project/{id}/messages", get(list_messages))
}

/// Full transcript of a project, oldest first.
#[utoipa::path(
    get,
    path = "/project/{id}/messages",
    tag = "chat",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Chat transcript", body = Vec<MessageResponse>),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<MessageResponse>>, ServerError> {
    let project = owned_project(&state, &user, &id).await?;
    let messages = state.store.list_messages(&project.id).await?;
    Ok(Json(messages.iter().map(|m| m.to_response()).collect()))
}
