//! Chat-completion client with model fallback.
//!
//! [`ResponseClient::get_response`] never fails. The conversation UI has no
//! error channel besides the assistant's message, so every provider failure
//! is folded into an [`AiReply`] whose [`ReplyOutcome`] records what happened.
//!
//! Resolution order for a turn:
//!
//! 1. mock mode → mock responder;
//! 2. no usable key → sandbox echo;
//! 3. models tried in order, first HTTP 200 wins, HTTP 401 stops the walk;
//! 4. the last failure decides the reply (auth → sandbox, quota → mock,
//!    provider error → its message, timeout / transport → fixed strings).

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{AiConfig, mask_key};
use crate::error::ClientBuildError;
use crate::mock;
use crate::types::ChatTurn;

pub const TIMED_OUT_REPLY: &str = "AI Error: Request timed out. Try again.";

/// How a reply was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// A provider model answered.
    Completed { model: String },
    /// No usable key, or the provider rejected the key / account.
    Sandbox,
    /// Answered by the mock responder (forced, or provider quota exhausted).
    Mock,
    /// Every attempt failed; the text describes the last failure.
    Failed,
}

/// Text to show as the assistant's message plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiReply {
    pub text: String,
    pub outcome: ReplyOutcome,
}

impl AiReply {
    fn completed(model: &str, text: String) -> Self {
        Self {
            text,
            outcome: ReplyOutcome::Completed {
                model: model.to_owned(),
            },
        }
    }

    fn sandbox(text: String) -> Self {
        Self {
            text,
            outcome: ReplyOutcome::Sandbox,
        }
    }

    fn mock(message: &str) -> Self {
        Self {
            text: mock::respond(message),
            outcome: ReplyOutcome::Mock,
        }
    }

    fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: ReplyOutcome::Failed,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, ReplyOutcome::Completed { .. })
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ProviderMessage<'a>],
}

#[derive(Debug, Serialize)]
struct ProviderMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Why a single model attempt did not produce an HTTP 200.
#[derive(Debug, Error)]
enum AttemptFailure {
    #[error("{model} answered HTTP {status}: {body}")]
    Status {
        model: String,
        status: StatusCode,
        body: String,
    },

    #[error("request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("{0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for AttemptFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AttemptFailure::Timeout(e)
        } else {
            AttemptFailure::Transport(e)
        }
    }
}

/// Completion client shared by every request handler.
#[derive(Debug, Clone)]
pub struct ResponseClient {
    config: AiConfig,
    http: reqwest::Client,
}

impl ResponseClient {
    pub fn new(config: AiConfig) -> Result<Self, ClientBuildError> {
        let mut headers = HeaderMap::new();
        if let Some(referer) = config.referer.as_deref() {
            insert_header(&mut headers, "HTTP-Referer", referer)?;
        }
        if let Some(title) = config.title.as_deref() {
            insert_header(&mut headers, "X-Title", title)?;
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("chatai/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Answer `message` given an optional system prompt and prior turns
    /// (oldest first).
    pub async fn get_response(
        &self,
        message: &str,
        system_prompt: Option<&str>,
        history: &[ChatTurn],
    ) -> AiReply {
        if self.config.mock_mode {
            debug!("mock mode forced; answering with the mock responder");
            return AiReply::mock(message);
        }

        let Some(api_key) = self.config.usable_api_key() else {
            info!("no usable API key configured; answering in sandbox mode");
            return AiReply::sandbox(format!(
                "Sandbox Mode: I received your message '{message}'. \
                 Since no valid API key is set, I'm simulating a response."
            ));
        };
        debug!(key = %mask_key(api_key), "API key present");

        let messages = build_messages(message, system_prompt, history);
        let mut last_failure: Option<AttemptFailure> = None;

        for model in &self.config.models {
            debug!(model = %model, context_len = messages.len(), "requesting completion");
            match self.attempt(api_key, model, &messages).await {
                Ok(body) => {
                    info!(model = %model, "provider answered");
                    return interpret_body(model, &body);
                }
                Err(failure) => {
                    warn!(model = %model, error = %failure, "completion attempt failed");
                    let unauthorized = matches!(
                        &failure,
                        AttemptFailure::Status { status, .. } if *status == StatusCode::UNAUTHORIZED
                    );
                    last_failure = Some(failure);
                    if unauthorized {
                        break;
                    }
                }
            }
        }

        resolve_failure(last_failure, message)
    }

    async fn attempt(
        &self,
        api_key: &str,
        model: &str,
        messages: &[ProviderMessage<'_>],
    ) -> Result<String, AttemptFailure> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&CompletionRequest { model, messages })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::OK {
            Ok(body)
        } else {
            Err(AttemptFailure::Status {
                model: model.to_owned(),
                status,
                body,
            })
        }
    }
}

fn insert_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
) -> Result<(), ClientBuildError> {
    let invalid = |message: String| ClientBuildError::InvalidHeader {
        header: name,
        message,
    };
    let key = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
    let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    headers.insert(key, value);
    Ok(())
}

/// System entry (if any) first, then history, then the new user message.
fn build_messages<'a>(
    message: &'a str,
    system_prompt: Option<&'a str>,
    history: &'a [ChatTurn],
) -> Vec<ProviderMessage<'a>> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    if let Some(system) = system_prompt.filter(|s| !s.is_empty()) {
        messages.push(ProviderMessage {
            role: "system",
            content: system,
        });
    }
    messages.extend(history.iter().map(|turn| ProviderMessage {
        role: turn.role.as_ref(),
        content: &turn.content,
    }));
    messages.push(ProviderMessage {
        role: "user",
        content: message,
    });
    messages
}

/// Turn a provider body into a reply: first choice's content, or the
/// provider's own error message.
fn interpret_body(model: &str, body: &str) -> AiReply {
    let json: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return AiReply::failed(format!("AI Error: {e}")),
    };

    let content = json
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.pointer("/message/content"))
        .and_then(Value::as_str);
    if let Some(content) = content {
        return AiReply::completed(model, content.to_owned());
    }

    let error_msg = provider_error_message(&json).unwrap_or_else(|| "Unknown error".to_owned());
    if error_msg.contains("User not found") {
        return AiReply::sandbox(format!("Sandbox Mode (User not found): {error_msg}"));
    }
    AiReply::failed(format!("AI Error: {error_msg}"))
}

fn provider_error_message(json: &Value) -> Option<String> {
    let error = json.get("error")?;
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_owned)
}

fn resolve_failure(last_failure: Option<AttemptFailure>, message: &str) -> AiReply {
    match last_failure {
        None => AiReply::failed("Error: All models failed. Last error: no models configured"),
        Some(AttemptFailure::Status { status, body, .. }) if status == StatusCode::UNAUTHORIZED => {
            let detail = match serde_json::from_str::<Value>(&body) {
                Ok(json) => provider_error_message(&json)
                    .unwrap_or_else(|| "Unknown Auth Error".to_owned()),
                Err(_) => body,
            };
            AiReply::sandbox(format!("Sandbox Mode (Auth Failed): {detail}"))
        }
        Some(AttemptFailure::Status { status, body, .. })
            if status == StatusCode::TOO_MANY_REQUESTS || body.contains("insufficient_quota") =>
        {
            info!(%status, "provider quota exhausted; falling back to the mock responder");
            AiReply::mock(message)
        }
        Some(AttemptFailure::Status { model, body, .. }) => interpret_body(&model, &body),
        Some(AttemptFailure::Timeout(_)) => AiReply::failed(TIMED_OUT_REPLY),
        Some(AttemptFailure::Transport(e)) => {
            AiReply::failed(format!("Error: All models failed. Last error: {e}"))
        }
    }
}
