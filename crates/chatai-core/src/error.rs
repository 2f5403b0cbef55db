use thiserror::Error;

/// Errors raised while constructing a [`crate::ResponseClient`].
///
/// Provider failures at request time are never errors: they resolve to an
/// [`crate::AiReply`] instead.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The underlying HTTP client could not be built (TLS backend, proxy, …).
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured attribution header is not a valid header value.
    #[error("invalid value for header {header}: {message}")]
    InvalidHeader {
        header: &'static str,
        message: String,
    },
}
