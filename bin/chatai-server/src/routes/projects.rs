use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;
use utoipa::OpenApi;
use uuid::Uuid;
use validator::Validate;

use crate::entities::{FileStore, Project, ProjectStore, PromptStore};
use crate::error::ServerError;
use crate::middleware::auth::AuthUser;
use crate::schemas::file::FileResponse;
use crate::schemas::project::{CreateProjectRequest, ProjectDetailResponse, ProjectResponse};
use crate::schemas::prompt::PromptResponse;
use crate::services::files::remove_blobs;
use crate::services::project::owned_project;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_projects, create_project, get_project, delete_project),
    components(schemas(
        CreateProjectRequest,
        ProjectResponse,
        ProjectDetailResponse,
        PromptResponse,
        FileResponse
    ))
)]
pub struct ProjectsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/project/{id}/", get(get_project).delete(delete_project))
}

#[utoipa::path(
    get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Caller's projects, newest first", body = Vec<ProjectResponse>),
        (status = 401, description = "Missing x-user-id header"),
    )
)]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<ProjectResponse>>, ServerError> {
    let projects = state.store.list_projects(user.id()).await?;
    Ok(Json(projects.iter().map(|p| p.to_response()).collect()))
}

#[utoipa::path(
    post,
    path = "/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid project name"),
        (status = 401, description = "Missing x-user-id header"),
    )
)]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ServerError> {
    req.validate()?;
    let project = Project {
        id: Uuid::new_v4().to_string(),
        user_id: user.id().to_owned(),
        name: req.name.trim().to_owned(),
        description: req.description.filter(|d| !d.trim().is_empty()),
        created_at: Utc::now(),
    };
    state.store.create_project(project.clone()).await?;
    info!(project_id = %project.id, user_id = %project.user_id, "project created");
    Ok((StatusCode::CREATED, Json(project.to_response())))
}

#[utoipa::path(
    get,
    path = "/project/{id}/",
    tag = "projects",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project with prompts and files", body = ProjectDetailResponse),
        (status = 401, description = "Missing x-user-id header"),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetailResponse>, ServerError> {
    let project = owned_project(&state, &user, &id).await?;
    let prompts = state.store.list_prompts(&project.id).await?;
    let files = state.store.list_files(&project.id).await?;
    Ok(Json(ProjectDetailResponse {
        project: project.to_response(),
        prompts: prompts.iter().map(|p| p.to_response()).collect(),
        files: files.iter().map(|f| f.to_response()).collect(),
        mock_mode: state.ai.config().is_sandboxed(),
    }))
}

#[utoipa::path(
    delete,
    path = "/project/{id}/",
    tag = "projects",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted", body = Value),
        (status = 401, description = "Missing x-user-id header"),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let project = owned_project(&state, &user, &id).await?;
    let blobs = state.store.list_files(&project.id).await?;
    state.store.delete_project(&project.id).await?;
    remove_blobs(
        &state.config.media_root,
        blobs.into_iter().map(|f| f.file_path),
    )
    .await;
    info!(project_id = %project.id, "project deleted");
    Ok(Json(json!({ "deleted": true })))
}
