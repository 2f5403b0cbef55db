//! Caller identity.
//!
//! Authentication happens upstream (reverse proxy or session gateway), which
//! forwards the authenticated user id in the `x-user-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ServerError;

pub static X_USER_ID: &str = "x-user-id";

/// The authenticated caller. Rejects the request with 401 when the header is
/// missing, blank or not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(String);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(X_USER_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| AuthUser(id.to_owned()))
            .ok_or_else(|| ServerError::Unauthorized("Authentication required.".to_owned()))
    }
}
