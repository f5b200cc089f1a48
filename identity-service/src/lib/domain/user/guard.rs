use std::sync::Arc;

use auth::SessionStore;
use auth::TokenIssuer;

use crate::domain::user::models::CredentialArtifact;
use crate::domain::user::models::Identity;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::AuthError;

/// Per-request gate resolving a credential artifact to an active caller.
///
/// Artifacts attest to a username only, so every resolution goes back to the
/// directory to observe deletions and the `disabled` flag.
pub struct AccessGuard<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    token_issuer: Arc<TokenIssuer>,
    session_store: Arc<SessionStore>,
}

impl<UD> AccessGuard<UD>
where
    UD: UserDirectory,
{
    pub fn new(
        directory: Arc<UD>,
        token_issuer: Arc<TokenIssuer>,
        session_store: Arc<SessionStore>,
    ) -> Self {
        Self {
            directory,
            token_issuer,
            session_store,
        }
    }

    /// Resolve the identity behind a credential artifact.
    ///
    /// # Errors
    /// * `Unauthenticated` - No artifact, artifact rejected, or the user no longer exists
    /// * `Directory` - User lookup failed
    pub async fn resolve_caller(
        &self,
        artifact: Option<&CredentialArtifact>,
    ) -> Result<Identity, AuthError> {
        let Some(artifact) = artifact else {
            tracing::debug!("No credential artifact presented");
            return Err(AuthError::Unauthenticated);
        };

        let subject = match artifact {
            CredentialArtifact::BearerToken(token) => self.token_issuer.resolve(token).map_err(|e| {
                tracing::debug!(strategy = artifact.kind(), reason = %e, "Credential artifact rejected");
                AuthError::Unauthenticated
            })?,
            CredentialArtifact::SessionId(session_id) => {
                self.session_store.resolve(session_id).map_err(|e| {
                    tracing::debug!(strategy = artifact.kind(), reason = %e, "Credential artifact rejected");
                    AuthError::Unauthenticated
                })?
            }
        };

        let username = Username::new(subject).map_err(|e| {
            tracing::debug!(reason = %e, "Credential artifact names an invalid username");
            AuthError::Unauthenticated
        })?;

        let record = self
            .directory
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::debug!(username = %username, "Credential artifact names an unknown user");
                AuthError::Unauthenticated
            })?;

        Ok(Identity::from(&record))
    }

    /// Reject identities whose account is disabled.
    ///
    /// # Errors
    /// * `AccountDisabled` - `identity.disabled` is set
    pub fn require_active(&self, identity: Identity) -> Result<Identity, AuthError> {
        if identity.disabled {
            tracing::warn!(username = %identity.username, "Rejected disabled account");
            return Err(AuthError::AccountDisabled);
        }

        Ok(identity)
    }

    /// Resolve the caller and require an active account.
    pub async fn authorize(
        &self,
        artifact: Option<&CredentialArtifact>,
    ) -> Result<Identity, AuthError> {
        let identity = self.resolve_caller(artifact).await?;
        self.require_active(identity)
    }
}

#[cfg(test)]
mod tests {
    use auth::SessionConfig;
    use chrono::Duration;

    use super::*;
    use crate::domain::user::mocks::record;
    use crate::domain::user::mocks::MockTestUserDirectory;
    use crate::user::errors::DirectoryError;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    struct Fixture {
        guard: AccessGuard<MockTestUserDirectory>,
        token_issuer: Arc<TokenIssuer>,
        session_store: Arc<SessionStore>,
    }

    fn fixture(directory: MockTestUserDirectory) -> Fixture {
        let token_issuer =
            Arc::new(TokenIssuer::new(SECRET, "HS256", Duration::minutes(30)).unwrap());
        let session_store = Arc::new(SessionStore::new(SessionConfig::default()).unwrap());
        let guard = AccessGuard::new(
            Arc::new(directory),
            Arc::clone(&token_issuer),
            Arc::clone(&session_store),
        );

        Fixture {
            guard,
            token_issuer,
            session_store,
        }
    }

    fn directory_with(username: &'static str, disabled: bool) -> MockTestUserDirectory {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .withf(move |u| u.as_str() == username)
            .returning(move |_| Ok(Some(record(username, "$argon2id$unused", disabled))));
        directory
    }

    #[tokio::test]
    async fn test_resolve_caller_with_bearer_token() {
        let fixture = fixture(directory_with("johndoe", false));
        let issued = fixture.token_issuer.issue("johndoe", None).unwrap();

        let identity = fixture
            .guard
            .resolve_caller(Some(&CredentialArtifact::BearerToken(issued.access_token)))
            .await
            .unwrap();

        assert_eq!(identity.username, "johndoe");
    }

    #[tokio::test]
    async fn test_resolve_caller_with_session() {
        let fixture = fixture(directory_with("johndoe", false));
        let session = fixture.session_store.create("johndoe", None);

        let identity = fixture
            .guard
            .resolve_caller(Some(&CredentialArtifact::SessionId(session.session_id)))
            .await
            .unwrap();

        assert_eq!(identity.username, "johndoe");
    }

    #[tokio::test]
    async fn test_resolve_caller_without_artifact() {
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_username().times(0);
        let fixture = fixture(directory);

        let result = fixture.guard.resolve_caller(None).await;
        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_resolve_caller_rejects_bad_artifacts() {
        let mut directory = MockTestUserDirectory::new();
        directory.expect_find_by_username().times(0);
        let fixture = fixture(directory);

        let expired_token = fixture
            .token_issuer
            .issue("johndoe", Some(Duration::zero()))
            .unwrap();
        let foreign_token = TokenIssuer::new(
            b"another-secret-key-that-is-32-bytes-long",
            "HS256",
            Duration::minutes(30),
        )
        .unwrap()
        .issue("johndoe", None)
        .unwrap();
        let expired_session = fixture.session_store.create("johndoe", Some(Duration::zero()));

        let artifacts = [
            CredentialArtifact::BearerToken("garbage".to_string()),
            CredentialArtifact::BearerToken(expired_token.access_token),
            CredentialArtifact::BearerToken(foreign_token.access_token),
            CredentialArtifact::SessionId("unknown".to_string()),
            CredentialArtifact::SessionId(expired_session.session_id),
        ];

        for artifact in &artifacts {
            let result = fixture.guard.resolve_caller(Some(artifact)).await;
            assert!(
                matches!(result, Err(AuthError::Unauthenticated)),
                "{:?} was not rejected",
                artifact
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_caller_for_removed_user() {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        let fixture = fixture(directory);
        let issued = fixture.token_issuer.issue("ghost", None).unwrap();

        let result = fixture
            .guard
            .resolve_caller(Some(&CredentialArtifact::BearerToken(issued.access_token)))
            .await;

        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_resolve_caller_directory_failure() {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(DirectoryError::Unavailable("timeout".to_string())));
        let fixture = fixture(directory);
        let session = fixture.session_store.create("johndoe", None);

        let result = fixture
            .guard
            .resolve_caller(Some(&CredentialArtifact::SessionId(session.session_id)))
            .await;

        assert!(matches!(result, Err(AuthError::Directory(_))));
    }

    #[tokio::test]
    async fn test_require_active() {
        let fixture = fixture(MockTestUserDirectory::new());
        let active = Identity::from(&record("johndoe", "$argon2id$unused", false));
        let disabled = Identity::from(&record("janedoe", "$argon2id$unused", true));

        assert_eq!(fixture.guard.require_active(active.clone()).unwrap(), active);
        assert!(matches!(
            fixture.guard.require_active(disabled),
            Err(AuthError::AccountDisabled)
        ));
    }

    #[tokio::test]
    async fn test_authorize_disabled_account() {
        let fixture = fixture(directory_with("janedoe", true));
        let issued = fixture.token_issuer.issue("janedoe", None).unwrap();
        let artifact = CredentialArtifact::BearerToken(issued.access_token);

        // The artifact itself is valid; only the account state rejects it.
        assert!(fixture.guard.resolve_caller(Some(&artifact)).await.is_ok());
        assert!(matches!(
            fixture.guard.authorize(Some(&artifact)).await,
            Err(AuthError::AccountDisabled)
        ));
    }
}
