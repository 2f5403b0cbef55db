//! One chat turn: validate, build context, ask the provider, persist.

use chatai_core::{ChatRole, ReplyOutcome, ResponseClient, assemble_history};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{ChatMessage, MessageStore, Project, PromptStore, SqliteStore};
use crate::state::AppState;

/// System prompt used when the project has none.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const EMPTY_MESSAGE: &str = "Message content cannot be empty.";

#[derive(Debug, Error)]
pub enum TurnError {
    /// Empty or whitespace-only message; nothing was written.
    #[error("{}", EMPTY_MESSAGE)]
    EmptyMessage,

    #[error("failed to persist chat turn: {0}")]
    Store(#[from] sqlx::Error),
}

/// The assistant's answer for a completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub outcome: ReplyOutcome,
}

pub struct ChatService<'a, S> {
    store: &'a S,
    ai: &'a ResponseClient,
    history_window: usize,
}

impl<'a> ChatService<'a, SqliteStore> {
    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(&state.store, &state.ai, state.config.history_window)
    }
}

impl<'a, S: PromptStore + MessageStore> ChatService<'a, S> {
    pub fn new(store: &'a S, ai: &'a ResponseClient, history_window: usize) -> Self {
        Self {
            store,
            ai,
            history_window,
        }
    }

    /// Answer `message` in the context of `project` and record both sides of
    /// the exchange, whatever the provider outcome.
    pub async fn handle_turn(
        &self,
        project: &Project,
        message: &str,
    ) -> Result<TurnOutcome, TurnError> {
        if message.trim().is_empty() {
            return Err(TurnError::EmptyMessage);
        }
        let received_at = Utc::now();

        let system_prompt = self
            .store
            .latest_prompt(&project.id)
            .await?
            .map(|p| p.content)
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_owned());

        let recent = self
            .store
            .recent_messages(&project.id, self.history_window)
            .await?;
        let history = assemble_history(&recent, self.history_window);
        debug!(project_id = %project.id, history_len = history.len(), "context assembled");

        let reply = self
            .ai
            .get_response(message, Some(system_prompt.as_str()), &history)
            .await;

        let user = ChatMessage {
            id: Uuid::new_v4().to_string(),
            project_id: project.id.clone(),
            role: ChatRole::User,
            content: message.to_owned(),
            created_at: received_at,
        };
        let assistant = ChatMessage {
            id: Uuid::new_v4().to_string(),
            project_id: project.id.clone(),
            role: ChatRole::Assistant,
            content: reply.text.clone(),
            created_at: Utc::now().max(received_at),
        };
        self.store.append_exchange(user, assistant).await?;

        info!(project_id = %project.id, outcome = ?reply.outcome, "chat turn recorded");
        Ok(TurnOutcome {
            reply: reply.text,
            outcome: reply.outcome,
        })
    }
}
