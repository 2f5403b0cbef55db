//! chatai-core – the AI side of the ChatAI platform.
//!
//! Everything here is independent of HTTP serving and persistence:
//!
//! - [`mock`]: canned replies used when mock mode is forced or the provider
//!   reports an exhausted quota.
//! - [`history`]: selection of the bounded conversation window sent as context.
//! - [`client`]: the completion client that walks the configured model list and
//!   always resolves to a displayable reply.
//! - [`config`]: the explicit provider configuration injected into the client.

pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod mock;
pub mod types;

pub use client::{AiReply, ReplyOutcome, ResponseClient};
pub use config::AiConfig;
pub use error::ClientBuildError;
pub use history::{assemble_history, HistorySource, DEFAULT_HISTORY_WINDOW};
pub use types::{ChatRole, ChatTurn};
