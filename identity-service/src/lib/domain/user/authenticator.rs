use std::sync::Arc;

use auth::PasswordHasher;

use crate::domain::user::models::Identity;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::AuthError;

/// Password verified when the username is unknown.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Verifies username/password pairs against the user directory.
///
/// Unknown users and wrong passwords fail identically, including in cost:
/// an unknown username is still checked against a dummy hash built under the
/// directory's own hashing scheme.
pub struct CredentialAuthenticator<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    password_hasher: PasswordHasher,
    dummy_hash: String,
}

impl<UD> CredentialAuthenticator<UD>
where
    UD: UserDirectory,
{
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `Password` - The dummy hash could not be computed
    pub fn new(directory: Arc<UD>) -> Result<Self, AuthError> {
        let password_hasher = PasswordHasher::new();
        let dummy_hash = match directory.hash_scheme() {
            Some(scheme) => password_hasher.hash_with(DUMMY_PASSWORD, &scheme)?,
            None => password_hasher.hash(DUMMY_PASSWORD)?,
        };

        Ok(Self {
            directory,
            password_hasher,
            dummy_hash,
        })
    }

    /// Verify a username/password pair.
    ///
    /// # Returns
    /// Identity of the authenticated user (no credential material)
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown or malformed username, or wrong password
    /// * `Directory` - User lookup failed
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let record = match Username::new(username.to_string()) {
            Ok(username) => self.directory.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(record) = record else {
            let _ = self.password_hasher.verify(password, &self.dummy_hash);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, &record.hashed_password) {
            return Err(AuthError::InvalidCredentials);
        }

        if PasswordHasher::is_legacy(&record.hashed_password) {
            tracing::info!(
                username = %record.username,
                "User authenticated against a legacy bcrypt hash"
            );
        }

        Ok(Identity::from(&record))
    }
}
