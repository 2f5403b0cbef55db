use crate::entities::{Project, ProjectStore};
use crate::error::ServerError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const PROJECT_NOT_FOUND: &str = "Project not found.";

/// Load a project owned by `user`. Someone else's project is reported as
/// missing, the same as a non-existent id.
pub async fn owned_project(
    state: &AppState,
    user: &AuthUser,
    project_id: &str,
) -> Result<Project, ServerError> {
    state
        .store
        .get_project(project_id, user.id())
        .await?
        .ok_or_else(|| ServerError::NotFound(PROJECT_NOT_FOUND.to_owned()))
}
