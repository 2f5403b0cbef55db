//! Provider configuration for [`crate::ResponseClient`].

use std::fmt;
use std::time::Duration;

/// OpenRouter's OpenAI-compatible chat-completion endpoint.
pub const OPENROUTER_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Candidate models, most affordable first.
pub const DEFAULT_MODELS: [&str; 4] = [
    "meta-llama/llama-3-8b-instruct",
    "meta-llama/llama-3-70b-instruct",
    "mistralai/mistral-7b-instruct",
    "openai/gpt-3.5-turbo",
];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PLACEHOLDER_FRAGMENT: &str = "yourkeyhere";
const PLACEHOLDER_KEYS: [&str; 1] = ["your_openai_api_key_here"];

/// Everything the completion client needs; built once at startup.
#[derive(Clone)]
pub struct AiConfig {
    /// Provider API key. Absent, blank, or placeholder keys select sandbox mode.
    pub api_key: Option<String>,
    /// Answer every turn with the mock responder without contacting the provider.
    pub mock_mode: bool,
    /// Chat-completion URL.
    pub endpoint: String,
    /// Models tried in order until one answers with HTTP 200.
    pub models: Vec<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Optional `HTTP-Referer` attribution header.
    pub referer: Option<String>,
    /// Optional `X-Title` attribution header.
    pub title: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            mock_mode: false,
            endpoint: OPENROUTER_CHAT_URL.to_owned(),
            models: DEFAULT_MODELS.iter().map(|m| (*m).to_owned()).collect(),
            timeout: DEFAULT_TIMEOUT,
            referer: None,
            title: None,
        }
    }
}

impl AiConfig {
    /// The trimmed API key, unless it is missing or a placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !is_placeholder_key(k))
    }

    /// `true` when turns will not reach the provider.
    pub fn is_sandboxed(&self) -> bool {
        self.mock_mode || self.usable_api_key().is_none()
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_deref().map(mask_key))
            .field("mock_mode", &self.mock_mode)
            .field("endpoint", &self.endpoint)
            .field("models", &self.models)
            .field("timeout", &self.timeout)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .finish()
    }
}

/// Empty keys and the sample values shipped in `.env` templates.
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || key.contains(PLACEHOLDER_FRAGMENT) || PLACEHOLDER_KEYS.contains(&key)
}

/// Short preview of a secret, safe for logs.
pub fn mask_key(key: &str) -> String {
    let key = key.trim();
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 15 {
        return "SHORT_KEY".to_owned();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{head}...{tail}")
}
