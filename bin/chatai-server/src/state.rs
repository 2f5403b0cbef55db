//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use chatai_core::ResponseClient;

use crate::config::Config;
use crate::entities::SqliteStore;
use crate::templates::Templates;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Projects, prompts, transcripts and file metadata.
    pub store: Arc<SqliteStore>,
    /// Completion client; holds the pooled HTTP connection.
    pub ai: Arc<ResponseClient>,
    pub templates: Arc<Templates>,
}
