use std::future::Future;

use chatai_core::ChatRole;

use crate::entities::{ChatMessage, SqliteStore, db_timestamp, parse_timestamp};

pub trait MessageStore: Send + Sync + 'static {
    /// Persist a user message and the assistant reply in one transaction.
    fn append_exchange(
        &self,
        user: ChatMessage,
        assistant: ChatMessage,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Full transcript, chronological.
    fn list_messages(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, sqlx::Error>> + Send;

    /// The `limit` most recent messages, returned chronologically.
    fn recent_messages(
        &self,
        project_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, sqlx::Error>> + Send;

    fn count_messages(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

type MessageRow = (String, String, String, String, String);

fn from_row(
    (id, project_id, role, content, created_at): MessageRow,
) -> Result<ChatMessage, sqlx::Error> {
    let role = role
        .parse::<ChatRole>()
        .map_err(|e| sqlx::Error::Decode(format!("invalid role {role:?}: {e}").into()))?;
    Ok(ChatMessage {
        id,
        project_id,
        role,
        content,
        created_at: parse_timestamp(&created_at),
    })
}

const INSERT_MESSAGE: &str =
    "INSERT INTO chat_messages (id, project_id, role, content, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5)";

impl MessageStore for SqliteStore {
    async fn append_exchange(
        &self,
        user: ChatMessage,
        assistant: ChatMessage,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for msg in [&user, &assistant] {
            sqlx::query(INSERT_MESSAGE)
                .bind(&msg.id)
                .bind(&msg.project_id)
                .bind(msg.role.to_string())
                .bind(&msg.content)
                .bind(db_timestamp(msg.created_at))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await
    }

    async fn list_messages(&self, project_id: &str) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT id, project_id, role, content, created_at FROM chat_messages \
             WHERE project_id = ?1 ORDER BY created_at ASC, rowid ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(from_row).collect()
    }

    async fn recent_messages(
        &self,
        project_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT id, project_id, role, content, created_at FROM chat_messages \
             WHERE project_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
        )
        .bind(project_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        let mut messages = rows.into_iter().map(from_row).collect::<Result<Vec<_>, _>>()?;
        messages.reverse();
        Ok(messages)
    }

    async fn count_messages(&self, project_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages WHERE project_id = ?1")
            .bind(project_id)
            .fetch_one(&self.pool)
            .await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::ProjectStore;
    use crate::test_support::{memory_store, message_at, project_for};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn exchange_is_stored_user_then_assistant() {
        let store = memory_store().await;
        let project = project_for("alice", "p");
        store.create_project(project.clone()).await.unwrap();

        let at = Utc::now();
        store
            .append_exchange(
                message_at(&project.id, ChatRole::User, "question", at),
                message_at(&project.id, ChatRole::Assistant, "answer", at),
            )
            .await
            .unwrap();

        let transcript = store.list_messages(&project.id).await.unwrap();
        let roles: Vec<ChatRole> = transcript.iter().map(|m| m.role).collect();
        assert_eq!(roles, [ChatRole::User, ChatRole::Assistant]);
        assert_eq!(transcript[1].content, "answer");
    }

    #[tokio::test]
    async fn failed_exchange_writes_nothing() {
        let store = memory_store().await;
        let project = project_for("alice", "p");
        store.create_project(project.clone()).await.unwrap();

        let at = Utc::now();
        let user = message_at(&project.id, ChatRole::User, "question", at);
        let mut clash = message_at(&project.id, ChatRole::Assistant, "answer", at);
        clash.id = user.id.clone();

        assert!(store.append_exchange(user, clash).await.is_err());
        assert_eq!(store.count_messages(&project.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn recent_messages_are_bounded_and_chronological() {
        let store = memory_store().await;
        let project = project_for("alice", "p");
        store.create_project(project.clone()).await.unwrap();

        let base = Utc::now() - Duration::hours(1);
        for i in 0..6 {
            let at = base + Duration::seconds(i);
            store
                .append_exchange(
                    message_at(&project.id, ChatRole::User, &format!("q{i}"), at),
                    message_at(&project.id, ChatRole::Assistant, &format!("a{i}"), at),
                )
                .await
                .unwrap();
        }

        let recent = store.recent_messages(&project.id, 3).await.unwrap();
        let contents: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["a4", "q5", "a5"]);
        assert_eq!(store.count_messages(&project.id).await.unwrap(), 12);
    }
}
