use std::future::Future;

use crate::entities::{Project, SqliteStore, db_timestamp, parse_timestamp};

pub trait ProjectStore: Send + Sync + 'static {
    fn create_project(
        &self,
        project: Project,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// The project with `id`, only if it is owned by `user_id`.
    fn get_project(
        &self,
        id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<Project>, sqlx::Error>> + Send;

    /// The user's projects, newest first.
    fn list_projects(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Project>, sqlx::Error>> + Send;

    /// Delete a project and, through `ON DELETE CASCADE`, its prompts,
    /// messages and file rows. Returns `false` when nothing was deleted.
    fn delete_project(&self, id: &str) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    /// Total chat messages across all of the user's projects.
    fn count_messages_for_user(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

type ProjectRow = (String, String, String, Option<String>, String);

fn from_row((id, user_id, name, description, created_at): ProjectRow) -> Project {
    Project {
        id,
        user_id,
        name,
        description,
        created_at: parse_timestamp(&created_at),
    }
}

impl ProjectStore for SqliteStore {
    async fn create_project(&self, project: Project) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO projects (id, user_id, name, description, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&project.id)
        .bind(&project.user_id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(db_timestamp(project.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_project(&self, id: &str, user_id: &str) -> Result<Option<Project>, sqlx::Error> {
        let row: Option<ProjectRow> = sqlx::query_as(
            "SELECT id, user_id, name, description, created_at \
             FROM projects WHERE id = ?1 AND user_id = ?2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(from_row))
    }

    async fn list_projects(&self, user_id: &str) -> Result<Vec<Project>, sqlx::Error> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT id, user_id, name, description, created_at \
             FROM projects WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn delete_project(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_messages_for_user(&self, user_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM chat_messages m \
             JOIN projects p ON p.id = m.project_id WHERE p.user_id = ?1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
