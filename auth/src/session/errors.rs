use thiserror::Error;

/// Error type for session operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session is invalid")]
    InvalidSession,

    #[error("Session is expired")]
    ExpiredSession,

    #[error("Session identifier too short: minimum {min} bytes, got {actual}")]
    WeakIdentifier { min: usize, actual: usize },
}
