use chatai_core::{ChatRole, HistorySource};
use chrono::{DateTime, Utc};

/// A single message row in the `chat_messages` table. Never updated.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub project_id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl HistorySource for ChatMessage {
    fn role(&self) -> ChatRole {
        self.role
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}
