//! Failure taxonomy for API calls
//!
//! Every network-facing operation resolves to one of these variants
//! instead of bubbling a transport error. The display strings are the
//! user-visible messages.

use thiserror::Error;

/// What went wrong with a call to the banter API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server rejected the attached credential (HTTP 401).
    /// Observing this tears the session down.
    #[error("Unauthorized: please login again")]
    Unauthorized,

    /// The server refused the request and said why: the `error` field of
    /// a 4xx body, or an operation-specific fallback message.
    #[error("{0}")]
    Rejected(String),

    /// Non-success status on a read, or a body that was not the JSON we
    /// expected.
    #[error("Server error")]
    ServerError,

    /// The request never completed.
    #[error("Cannot reach server")]
    NetworkUnreachable,

    /// Rejected client-side before any call was made.
    #[error("{0}")]
    Validation(String),
}

/// Result alias used across the client.
pub type ApiResult<T> = Result<T, ApiError>;
