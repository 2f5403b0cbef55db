use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;
use crate::entities::Prompt;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePromptRequest {
    #[validate(custom(function = "not_blank", message = "Prompt content cannot be empty."))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PromptResponse {
    pub id: String,
    pub content: String,
    pub created_at: String,
}

impl Prompt {
    pub fn to_response(&self) -> PromptResponse {
        PromptResponse {
            id: self.id.clone(),
            content: self.content.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
