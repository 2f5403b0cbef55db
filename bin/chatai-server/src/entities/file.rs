use std::future::Future;

use crate::entities::{ProjectFile, SqliteStore, db_timestamp, parse_timestamp};

pub trait FileStore: Send + Sync + 'static {
    fn create_file(&self, file: ProjectFile)
    -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Files of a project, newest first.
    fn list_files(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Vec<ProjectFile>, sqlx::Error>> + Send;
}

impl FileStore for SqliteStore {
    async fn create_file(&self, file: ProjectFile) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO project_files (id, project_id, name, file_path, uploaded_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&file.id)
        .bind(&file.project_id)
        .bind(&file.name)
        .bind(&file.file_path)
        .bind(db_timestamp(file.uploaded_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_files(&self, project_id: &str) -> Result<Vec<ProjectFile>, sqlx::Error> {
        let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT id, project_id, name, file_path, uploaded_at FROM project_files \
             WHERE project_id = ?1 ORDER BY uploaded_at DESC, rowid DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, project_id, name, file_path, uploaded_at)| ProjectFile {
                id,
                project_id,
                name,
                file_path,
                uploaded_at: parse_timestamp(&uploaded_at),
            })
            .collect())
    }
}
