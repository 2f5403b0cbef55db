use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::ProjectFile;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileResponse {
    pub id: String,
    pub name: String,
    /// Location relative to the media root.
    pub file_path: String,
    pub uploaded_at: String,
}

/// Multipart form accepted by `POST /project/{id}/files` (documentation only).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Display name; defaults to the uploaded filename.
    pub name: Option<String>,
}

impl ProjectFile {
    pub fn to_response(&self) -> FileResponse {
        FileResponse {
            id: self.id.clone(),
            name: self.name.clone(),
            file_path: self.file_path.clone(),
            uploaded_at: self.uploaded_at.to_rfc3339(),
        }
    }
}
