use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use utoipa::OpenApi;
use uuid::Uuid;
use validator::Validate;

use crate::entities::{Prompt, PromptStore};
use crate::error::ServerError;
use crate::middleware::auth::AuthUser;
use crate::schemas::prompt::{CreatePromptRequest, PromptResponse};
use crate::services::project::owned_project;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(create_prompt), components(schemas(CreatePromptRequest, PromptResponse)))]
pub struct PromptsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/project/{id}/prompts", post(create_prompt))
}

/// Add a system prompt. The newest prompt becomes the project's active one.
#[utoipa::path(
    post,
    path = "/project/{id}/prompts",
    tag = "projects",
    params(("id" = String, Path, description = "Project id")),
    request_body = CreatePromptRequest,
    responses(
        (status = 201, description = "Prompt created", body = PromptResponse),
        (status = 400, description = "Empty prompt"),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn create_prompt(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<CreatePromptRequest>,
) -> Result<(StatusCode, Json<PromptResponse>), ServerError> {
    let project = owned_project(&state, &user, &id).await?;
    req.validate()?;
    let prompt = Prompt {
        id: Uuid::new_v4().to_string(),
        project_id: project.id,
        content: req.content,
        created_at: Utc::now(),
    };
    state.store.create_prompt(prompt.clone()).await?;
    Ok((StatusCode::CREATED, Json(prompt.to_response())))
}

#[cfg(test)]
mod test {
    use crate::test_support::{TestApp, sandbox_config};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn newest_prompt_is_listed_first() {
        let app = TestApp::new(sandbox_config()).await;
        let id = app.create_project("alice", "Prompts").await;
        let path = format!("/project/{id}/prompts");

        for content in ["Be formal.", "Be casual."] {
            let (status, _) = app.post_json("alice", &path, json!({ "content": content })).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, detail) = app.get("alice", &format!("/project/{id}/")).await;
        assert_eq!(detail["prompts"][0]["content"], "Be casual.");
        assert_eq!(detail["prompts"][1]["content"], "Be formal.");
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected() {
        let app = TestApp::new(sandbox_config()).await;
        let id = app.create_project("alice", "Prompts").await;
        let (status, _) = app
            .post_json("alice", &format!("/project/{id}/prompts"), json!({ "content": "  " }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
