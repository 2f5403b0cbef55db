use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::file::FileResponse;
use super::not_blank;
use super::prompt::PromptResponse;
use crate::entities::Project;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    #[validate(
        length(min = 1, max = 255, message = "Project name must be 1 to 255 characters."),
        custom(function = "not_blank", message = "Project name must not be blank.")
    )]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectDetailResponse {
    pub project: ProjectResponse,
    /// Newest first; the first entry is the active system prompt.
    pub prompts: Vec<PromptResponse>,
    pub files: Vec<FileResponse>,
    /// `true` when replies are simulated (mock mode or no usable API key).
    pub mock_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub projects: Vec<ProjectResponse>,
    pub total_projects: usize,
    pub total_messages: i64,
}

impl Project {
    pub fn to_response(&self) -> ProjectResponse {
        ProjectResponse {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
