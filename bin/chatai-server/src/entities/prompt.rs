use std::future::Future;

use crate::entities::{Prompt, SqliteStore, db_timestamp, parse_timestamp};

pub trait PromptStore: Send + Sync + 'static {
    fn create_prompt(&self, prompt: Prompt)
    -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// All prompts of a project, newest first.
    fn list_prompts(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Vec<Prompt>, sqlx::Error>> + Send;

    /// The project's active prompt: the most recently created one.
    fn latest_prompt(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Option<Prompt>, sqlx::Error>> + Send;
}

type PromptRow = (String, String, String, String);

fn from_row((id, project_id, content, created_at): PromptRow) -> Prompt {
    Prompt {
        id,
        project_id,
        content,
        created_at: parse_timestamp(&created_at),
    }
}

impl PromptStore for SqliteStore {
    async fn create_prompt(&self, prompt: Prompt) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO prompts (id, project_id, content, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&prompt.id)
        .bind(&prompt.project_id)
        .bind(&prompt.content)
        .bind(db_timestamp(prompt.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_prompts(&self, project_id: &str) -> Result<Vec<Prompt>, sqlx::Error> {
        let rows: Vec<PromptRow> = sqlx::query_as(
            "SELECT id, project_id, content, created_at FROM prompts \
             WHERE project_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn latest_prompt(&self, project_id: &str) -> Result<Option<Prompt>, sqlx::Error> {
        let row: Option<PromptRow> = sqlx::query_as(
            "SELECT id, project_id, content, created_at FROM prompts \
             WHERE project_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT 1",
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(from_row))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::ProjectStore;
    use crate::test_support::{memory_store, project_for, prompt_at};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn latest_prompt_is_most_recent() {
        let store = memory_store().await;
        let project = project_for("alice", "p");
        store.create_project(project.clone()).await.unwrap();
        assert!(store.latest_prompt(&project.id).await.unwrap().is_none());

        let now = Utc::now();
        store
            .create_prompt(prompt_at(&project.id, "old", now - Duration::minutes(5)))
            .await
            .unwrap();
        store.create_prompt(prompt_at(&project.id, "new", now)).await.unwrap();

        let latest = store.latest_prompt(&project.id).await.unwrap();
        assert_eq!(latest.map(|p| p.content), Some("new".to_owned()));

        let listed: Vec<String> = store
            .list_prompts(&project.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.content)
            .collect();
        assert_eq!(listed, ["new", "old"]);
    }

    #[tokio::test]
    async fn equal_timestamps_prefer_later_insert() {
        let store = memory_store().await;
        let project = project_for("alice", "p");
        store.create_project(project.clone()).await.unwrap();

        let at = Utc::now();
        store.create_prompt(prompt_at(&project.id, "first", at)).await.unwrap();
        store.create_prompt(prompt_at(&project.id, "second", at)).await.unwrap();

        let latest = store.latest_prompt(&project.id).await.unwrap();
        assert_eq!(latest.map(|p| p.content), Some("second".to_owned()));
    }
}
