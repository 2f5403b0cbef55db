//! Blob storage for uploaded project files.
//!
//! Blobs live under `<media_root>/project_files/` with a UUID prefix so two
//! uploads with the same name never collide. The database stores the path
//! relative to the media root.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entities::{FileStore, ProjectFile};
use crate::error::ServerError;

pub const UPLOAD_DIR: &str = "project_files";

const MAX_NAME_CHARS: usize = 100;

/// Reduce an uploaded filename to a safe single path component.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_CHARS)
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_owned()
    } else {
        cleaned.to_owned()
    }
}

/// Write `bytes` under the media root and return the stored relative path.
pub async fn store_upload(
    media_root: &Path,
    original_name: &str,
    bytes: &[u8],
) -> std::io::Result<String> {
    let relative = format!("{UPLOAD_DIR}/{}-{}", Uuid::new_v4(), sanitize_filename(original_name));
    let target = media_root.join(&relative);
    if let Some(dir) = target.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(&target, bytes).await?;
    debug!(path = %target.display(), size = bytes.len(), "upload stored");
    Ok(relative)
}

/// Store the blob, then record it. The blob is removed again when the row
/// cannot be written.
pub async fn save_project_file<S: FileStore>(
    store: &S,
    media_root: &Path,
    project_id: &str,
    name: String,
    original_name: &str,
    bytes: &[u8],
) -> Result<ProjectFile, ServerError> {
    let file_path = store_upload(media_root, original_name, bytes).await?;
    let file = ProjectFile {
        id: Uuid::new_v4().to_string(),
        project_id: project_id.to_owned(),
        name,
        file_path,
        uploaded_at: Utc::now(),
    };
    if let Err(e) = store.create_file(file.clone()).await {
        remove_blobs(media_root, [file.file_path]).await;
        return Err(e.into());
    }
    Ok(file)
}

/// Remove stored blobs, logging failures instead of returning them.
pub async fn remove_blobs(media_root: &Path, relative_paths: impl IntoIterator<Item = String>) {
    for relative in relative_paths {
        let path: PathBuf = media_root.join(&relative);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(path = %path.display(), error = %e, "failed to remove project file blob");
        }
    }
}
