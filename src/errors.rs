// src/errors.rs
use thiserror::Error;

/// Component-level failure taxonomy. Precondition failures never reach the
/// network; validation failures carry the server's reason; fetch failures are
/// transport or unstructured server errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("precondition not met: {0}")]
    Precondition(String),

    #[error("{0}")]
    Validation(String),

    #[error("request failed: {0}")]
    Fetch(String),
}

/// User-facing outcome categories. The facade is the only place that
/// downgrades `ClientError` into these; nothing below it knows about them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngagementError {
    /// The operation cannot be attempted yet (missing profile, empty name).
    #[error("blocked: {0}")]
    Blocked(String),

    /// The server refused the input; not retried automatically.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Transport or server failure; retry is user-initiated.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl From<ClientError> for EngagementError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Precondition(msg) => EngagementError::Blocked(msg),
            ClientError::Validation(msg) => EngagementError::Rejected(msg),
            ClientError::Fetch(msg) => EngagementError::Unavailable(msg),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Fetch(err.to_string())
    }
}
