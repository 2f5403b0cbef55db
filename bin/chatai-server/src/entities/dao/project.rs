use chrono::{DateTime, Utc};

/// A row in the `projects` table.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    /// Owner; only this user can see or modify the project.
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
