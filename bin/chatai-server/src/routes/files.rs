use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;

use crate::entities::FileStore;
use crate::error::ServerError;
use crate::middleware::auth::AuthUser;
use crate::schemas::file::{FileResponse, UploadFileForm};
use crate::services::files::save_project_file;
use crate::services::project::owned_project;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(list_files, upload_file), components(schemas(FileResponse, UploadFileForm)))]
pub struct FilesApi;

pub fn router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new().route(
        "/project/{id}/files",
        get(list_files)
            .post(upload_file)
            .layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}

#[utoipa::path(
    get,
    path = "/project/{id}/files",
    tag = "files",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project files, newest first", body = Vec<FileResponse>),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<FileResponse>>, ServerError> {
    let project = owned_project(&state, &user, &id).await?;
    let files = state.store.list_files(&project.id).await?;
    Ok(Json(files.iter().map(|f| f.to_response()).collect()))
}

/// Upload a file (`file` part) with an optional display `name` part.
#[utoipa::path(
    post,
    path = "/project/{id}/files",
    tag = "files",
    params(("id" = String, Path, description = "Project id")),
    request_body(content = UploadFileForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = FileResponse),
        (status = 400, description = "No file part in the form"),
        (status = 404, description = "Project not found"),
        (status = 413, description = "Upload exceeds the size limit"),
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileResponse>), ServerError> {
    let project = owned_project(&state, &user, &id).await?;

    let mut upload: Option<(String, bytes::Bytes)> = None;
    let mut display_name: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let part = field.name().map(str::to_owned);
        match part.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Failed to read upload: {e}")))?;
                upload = Some((filename, data));
            }
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Invalid name field: {e}")))?;
                display_name = Some(text);
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| ServerError::BadRequest("No file uploaded.".to_owned()))?;
    let name = display_name
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| filename.clone());

    let file = save_project_file(
        state.store.as_ref(),
        &state.config.media_root,
        &project.id,
        name,
        &filename,
        &data,
    )
    .await?;
    info!(file_id = %file.id, project_id = %file.project_id, size = data.len(), "file uploaded");
    Ok((StatusCode::CREATED, Json(file.to_response())))
}
