use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for user directory operations
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Duplicate username: {0}")]
    DuplicateUsername(String),

    #[error("Unrecognized password hash for user: {0}")]
    UnrecognizedHash(String),

    #[error("Password hash for user {0} does not share the directory's hashing scheme")]
    MixedHashSchemes(String),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for authentication and access operations.
///
/// Artifact-specific failures (bad signature, expired token, unknown or
/// expired session, vanished user) all collapse into `Unauthenticated` so
/// callers cannot probe which check failed.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Inactive user")]
    AccountDisabled,

    // Infrastructure errors
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),
}
