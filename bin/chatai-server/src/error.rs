//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a JSON body
//! `{"error": "..."}` with an appropriate status code.
//!
//! Internal errors (Database, Io, Template, Internal) are logged with full
//! detail; the caller only sees a generic message and a coarse category so
//! file paths and SQL never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::chat::{EMPTY_MESSAGE, TurnError};

pub const SERVER_ERROR_MESSAGE: &str = "A server-side error occurred.";

/// All errors that can occur in the chatai-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading or writing uploaded files under the media root.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The project does not exist or belongs to someone else.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// No authenticated user on the request.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let client_error = match &self {
            ServerError::NotFound(m) => Some((StatusCode::NOT_FOUND, m)),
            ServerError::BadRequest(m) => Some((StatusCode::BAD_REQUEST, m)),
            ServerError::Unauthorized(m) => Some((StatusCode::UNAUTHORIZED, m)),
            ServerError::MethodNotAllowed(m) => Some((StatusCode::METHOD_NOT_ALLOWED, m)),
            _ => None,
        };
        if let Some((status, message)) = client_error {
            return (status, Json(json!({ "error": message }))).into_response();
        }

        let details = match &self {
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                "database error"
            }
            ServerError::Io(e) => {
                error!(error = %e, "storage error");
                "storage error"
            }
            ServerError::Template(e) => {
                error!(error = ?e, "template rendering failed");
                "internal error"
            }
            other => {
                error!(error = %other, "internal server error");
                "internal error"
            }
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": SERVER_ERROR_MESSAGE, "details": details })),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(e: anyhow::Error) -> Self {
        error!(error = ?e, "converting anyhow error to ServerError::Internal");
        ServerError::Internal(e.to_string())
    }
}

impl From<validator::ValidationErrors> for ServerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("invalid value for `{field}`"),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        ServerError::BadRequest(message)
    }
}

impl From<TurnError> for ServerError {
    fn from(e: TurnError) -> Self {
        match e {
            TurnError::EmptyMessage => ServerError::BadRequest(EMPTY_MESSAGE.to_owned()),
            TurnError::Store(e) => ServerError::Database(e),
        }
    }
}
