use async_trait::async_trait;

use auth::HashScheme;
use auth::IssuedToken;
use auth::Session;

use crate::domain::user::models::CredentialArtifact;
use crate::domain::user::models::Identity;
use crate::domain::user::models::UserRecord;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;
use crate::user::errors::DirectoryError;

/// Port for authentication and access operations used by the inbound adapters.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `username` - Raw username as submitted
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Signed access token and its expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password (indistinguishable)
    /// * `AccountDisabled` - Credentials are valid but the account is disabled
    /// * `TokenGenerationFailed` - Token signing failed
    /// * `Directory` - User lookup failed
    async fn login_with_token(&self, username: &str, password: &str)
        -> Result<IssuedToken, AuthError>;

    /// Verify credentials and open a server-side session.
    ///
    /// # Arguments
    /// * `username` - Raw username as submitted
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// The stored session, whose identifier goes to the client cookie
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password (indistinguishable)
    /// * `AccountDisabled` - Credentials are valid but the account is disabled
    /// * `Directory` - User lookup failed
    async fn login_with_session(&self, username: &str, password: &str)
        -> Result<Session, AuthError>;

    /// Close a session. Unknown identifiers are ignored.
    async fn logout(&self, session_id: &str);

    /// Resolve the caller of a request and require an active account.
    ///
    /// # Arguments
    /// * `artifact` - Bearer token or session identifier, if the request carried one
    ///
    /// # Returns
    /// Identity of the caller
    ///
    /// # Errors
    /// * `Unauthenticated` - Missing, invalid or expired artifact, or the user no longer exists
    /// * `AccountDisabled` - The caller's account is disabled
    /// * `Directory` - User lookup failed
    async fn authorize(&self, artifact: Option<&CredentialArtifact>) -> Result<Identity, AuthError>;

    /// Drop expired sessions. Returns how many were removed.
    fn purge_expired_sessions(&self) -> usize;

    /// Release in-memory session state at shutdown.
    fn shutdown(&self);
}

/// Read access to stored user records.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve a user by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Directory backend failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<UserRecord>, DirectoryError>;

    /// Hashing scheme shared by every stored password.
    ///
    /// Logins for unknown usernames verify against a decoy hashed under this
    /// scheme, so they cost the same as a wrong password for a real user.
    /// `None` when the directory holds no users.
    fn hash_scheme(&self) -> Option<HashScheme>;
}
