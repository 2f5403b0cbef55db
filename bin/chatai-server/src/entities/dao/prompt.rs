use chrono::{DateTime, Utc};

/// A row in the `prompts` table. The newest prompt of a project is its
/// active system prompt.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub id: String,
    pub project_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
