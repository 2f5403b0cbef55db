//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;
use std::time::Duration;

use chatai_core::{AiConfig, DEFAULT_HISTORY_WINDOW};

/// Shortest accepted provider timeout; `0` would fail every request at once.
const MIN_AI_TIMEOUT_SECS: u64 = 1;

/// Runtime configuration for chatai-server.
///
/// Every field has a default so the server starts without any environment
/// variables set (in sandbox mode, since no provider key is configured).
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// sqlx SQLite URL (default: `"sqlite://chatai.db"`).
    pub database_url: String,

    /// Directory that receives uploaded project files.
    pub media_root: PathBuf,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// When set, logs are also written to a daily-rolling file in this directory.
    pub log_dir: Option<String>,

    /// Comma-separated list of allowed CORS origins; `None` allows any.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// Number of prior messages sent to the provider as context.
    pub history_window: usize,

    /// Body limit for multipart uploads, in bytes.
    pub max_upload_bytes: usize,

    /// Completion provider settings.
    pub ai: AiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let api_key = set("CHATAI_API_KEY").or_else(|| var("OPENROUTER_API_KEY"));
        let mock_mode = set("CHATAI_MOCK_MODE")
            .or_else(|| var("MOCK_MODE"))
            .is_some_and(|v| parse_bool(&v));

        let defaults = AiConfig::default();
        let models = var("CHATAI_AI_MODELS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .filter(|models| !models.is_empty())
            .unwrap_or(defaults.models);

        let ai = AiConfig {
            api_key,
            mock_mode,
            endpoint: env_or(&var, "CHATAI_AI_ENDPOINT", &defaults.endpoint),
            models,
            timeout: Duration::from_secs(
                parse_env(&var, "CHATAI_AI_TIMEOUT_SECS", 30_u64).max(MIN_AI_TIMEOUT_SECS),
            ),
            referer: set("CHATAI_AI_REFERER"),
            title: set("CHATAI_AI_TITLE"),
        };

        Self {
            bind_address: env_or(&var, "CHATAI_BIND", "0.0.0.0:8000"),
            database_url: env_or(&var, "CHATAI_DATABASE_URL", "sqlite://chatai.db"),
            media_root: PathBuf::from(env_or(&var, "CHATAI_MEDIA_ROOT", "media")),
            log_level: env_or(&var, "CHATAI_LOG", "info"),
            log_json: var("CHATAI_LOG_JSON").is_some_and(|v| parse_bool(&v)),
            log_dir: set("CHATAI_LOG_DIR"),
            cors_allowed_origins: set("CHATAI_CORS_ORIGINS"),
            enable_swagger: var("CHATAI_ENABLE_SWAGGER").is_none_or(|v| parse_bool(&v)),
            history_window: parse_env(&var, "CHATAI_HISTORY_WINDOW", DEFAULT_HISTORY_WINDOW),
            max_upload_bytes: parse_env(&var, "CHATAI_MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            ai,
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(var: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    var(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
}
