use chrono::{DateTime, Utc};

/// A row in the `project_files` table.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub id: String,
    pub project_id: String,
    /// Display name.
    pub name: String,
    /// Blob location relative to the media root.
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}
