use std::sync::Arc;

use async_trait::async_trait;
use auth::IssuedToken;
use auth::Session;
use auth::SessionStore;
use auth::TokenIssuer;

use crate::domain::user::authenticator::CredentialAuthenticator;
use crate::domain::user::guard::AccessGuard;
use crate::domain::user::models::CredentialArtifact;
use crate::domain::user::models::Identity;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserDirectory;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort wiring both strategies
/// to one directory.
pub struct AuthService<UD>
where
    UD: UserDirectory,
{
    authenticator: CredentialAuthenticator<UD>,
    guard: AccessGuard<UD>,
    token_issuer: Arc<TokenIssuer>,
    session_store: Arc<SessionStore>,
}

impl<UD> AuthService<UD>
where
    UD: UserDirectory,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User lookup implementation
    /// * `token_issuer` - Bearer token signer/verifier
    /// * `session_store` - Live session map, owned for the lifetime of the service
    ///
    /// # Errors
    /// * `Password` - Authenticator initialisation failed
    pub fn new(
        directory: Arc<UD>,
        token_issuer: Arc<TokenIssuer>,
        session_store: Arc<SessionStore>,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            authenticator: CredentialAuthenticator::new(Arc::clone(&directory))?,
            guard: AccessGuard::new(
                directory,
                Arc::clone(&token_issuer),
                Arc::clone(&session_store),
            ),
            token_issuer,
            session_store,
        })
    }

    async fn verify_active(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self
            .authenticator
            .authenticate(username, password)
            .await
            .inspect_err(|e| {
                if matches!(e, AuthError::InvalidCredentials) {
                    tracing::info!("Login rejected: invalid credentials");
                }
            })?;

        self.guard.require_active(identity)
    }
}

#[async_trait]
impl<UD> AuthServicePort for AuthService<UD>
where
    UD: UserDirectory,
{
    async fn login_with_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        let identity = self.verify_active(username, password).await?;

        let issued = self
            .token_issuer
            .issue(&identity.username, None)
            .map_err(|e| AuthError::TokenGenerationFailed(e.to_string()))?;

        tracing::info!(
            username = %identity.username,
            expires_at = %issued.expires_at,
            "Access token issued"
        );

        Ok(issued)
    }

    async fn login_with_session(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let identity = self.verify_active(username, password).await?;

        let session = self.session_store.create(&identity.username, None);

        tracing::info!(
            username = %identity.username,
            expires_at = %session.expires_at,
            live_sessions = self.session_store.len(),
            "Session opened"
        );

        Ok(session)
    }

    async fn logout(&self, session_id: &str) {
        if self.session_store.revoke(session_id) {
            tracing::info!("Session closed");
        } else {
            tracing::debug!("Logout for unknown session ignored");
        }
    }

    async fn authorize(&self, artifact: Option<&CredentialArtifact>) -> Result<Identity, AuthError> {
        self.guard.authorize(artifact).await
    }

    fn purge_expired_sessions(&self) -> usize {
        self.session_store.purge_expired()
    }

    fn shutdown(&self) {
        let live_sessions = self.session_store.len();
        self.session_store.clear();
        tracing::info!(live_sessions, "Session store cleared");
    }
}
