use std::fmt;

use serde::Serialize;

use crate::user::errors::UsernameError;

/// Stored user record.
///
/// Owned by the user directory. The password hash never leaves the
/// authentication boundary; everything downstream sees an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: Username,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
    pub hashed_password: String,
}

/// Public view of a user, free of credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
}

impl From<&UserRecord> for Identity {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.as_str().to_string(),
            email: record.email.clone(),
            full_name: record.full_name.clone(),
            disabled: record.disabled,
        }
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Credential artifact presented with a request.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialArtifact {
    /// Signed access token from an `Authorization: Bearer` header
    BearerToken(String),
    /// Opaque identifier from the session cookie
    SessionId(String),
}

impl CredentialArtifact {
    /// Strategy name, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            CredentialArtifact::BearerToken(_) => "bearer_token",
            CredentialArtifact::SessionId(_) => "session",
        }
    }
}

// Artifacts are secrets; keep them out of logs and panic messages.
impl fmt::Debug for CredentialArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialArtifact::{}(<redacted>)", self.kind())
    }
}
