use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /project/{id}/chat/`. Parsed by hand so malformed JSON and
/// a missing message get their own error messages.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

/// Form posted by the HTML chat page.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatPageForm {
    #[serde(default)]
    pub message: Option<String>,
}
