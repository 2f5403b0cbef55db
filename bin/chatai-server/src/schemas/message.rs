use chatai_core::ChatRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::ChatMessage;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: String,
    #[schema(value_type = String, example = "user")]
    pub role: ChatRole,
    pub content: String,
    pub created_at: String,
}

impl ChatMessage {
    pub fn to_response(&self) -> MessageResponse {
        MessageResponse {
            id: self.id.clone(),
            role: self.role,
            content: self.content.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
