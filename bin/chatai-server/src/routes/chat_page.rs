//! Server-rendered chat page: the transcript plus a message form.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Serialize;
use tracing::debug;
use utoipa::OpenApi;

use crate::entities::{MessageStore, Project};
use crate::error::ServerError;
use crate::middleware::auth::AuthUser;
use crate::schemas::chat::ChatPageForm;
use crate::schemas::message::MessageResponse;
use crate::schemas::project::ProjectResponse;
use crate::services::chat::{ChatService, TurnError};
use crate::services::project::owned_project;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(show_chat_page, submit_chat_page))]
pub struct ChatPageApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/project/{id}/chat_page/",
        get(show_chat_page).post(submit_chat_page),
    )
}

#[derive(Serialize)]
struct ChatPageContext {
    project: ProjectResponse,
    messages: Vec<MessageResponse>,
    mock_mode: bool,
}

#[utoipa::path(
    get,
    path = "/project/{id}/chat_page/",
    tag = "chat",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "HTML chat page", content_type = "text/html", body = String),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn show_chat_page(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Html<String>, ServerError> {
    let project = owned_project(&state, &user, &id).await?;
    render(&state, &project).await
}

/// Submit the form. A blank message is ignored and the page re-rendered.
#[utoipa::path(
    post,
    path = "/project/{id}/chat_page/",
    tag = "chat",
    params(("id" = String, Path, description = "Project id")),
    request_body(content = String, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "HTML chat page including the new exchange", content_type = "text/html", body = String),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn submit_chat_page(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Form(form): Form<ChatPageForm>,
) -> Result<Html<String>, ServerError> {
    let project = owned_project(&state, &user, &id).await?;
    let message = form.message.unwrap_or_default();

    match ChatService::from_state(&state)
        .handle_turn(&project, &message)
        .await
    {
        Ok(_) | Err(TurnError::EmptyMessage) => {}
        Err(e) => return Err(e.into()),
    }
    debug!(project_id = %project.id, "chat page re-rendered after submit");
    render(&state, &project).await
}

async fn render(state: &AppState, project: &Project) -> Result<Html<String>, ServerError> {
    let messages = state.store.list_messages(&project.id).await?;
    let ctx = ChatPageContext {
        project: project.to_response(),
        messages: messages.iter().map(|m| m.to_response()).collect(),
        mock_mode: state.ai.config().is_sandboxed(),
    };
    Ok(Html(state.templates.render_chat(ctx)?))
}
