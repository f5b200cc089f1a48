use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use argon2::Params;

use super::errors::PasswordError;
use super::scheme::HashScheme;

/// Prefixes of the bcrypt variants still accepted for verification.
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Password hashing implementation.
///
/// New hashes are always Argon2id. Verification additionally accepts
/// bcrypt hashes so directories provisioned by older tooling keep working.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Hash a plaintext password under an explicit scheme.
    ///
    /// Used to build hashes that cost exactly as much to verify as existing
    /// ones, such as the decoy checked for unknown users.
    ///
    /// # Errors
    /// * `HashingFailed` - Parameters rejected or hashing failed
    pub fn hash_with(&self, password: &str, scheme: &HashScheme) -> Result<String, PasswordError> {
        match scheme {
            HashScheme::Bcrypt { cost } => bcrypt::hash(password, *cost)
                .map_err(|e| PasswordError::HashingFailed(e.to_string())),
            HashScheme::Argon2 {
                algorithm,
                version,
                m_cost,
                t_cost,
                p_cost,
                output_len,
            } => {
                let params = Params::new(*m_cost, *t_cost, *p_cost, Some(*output_len))
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
                let salt = SaltString::generate(&mut OsRng);

                Argon2::new(*algorithm, *version, params)
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
        }
    }

    /// Verify a password against a stored hash.
    ///
    /// Digest comparison is constant-time for both supported formats.
    /// A hash that cannot be parsed never matches.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash, Argon2 PHC string or bcrypt modular crypt string
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if Self::is_legacy(hash) {
            return bcrypt::verify(password, hash).unwrap_or(false);
        }

        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Whether a stored hash uses the legacy bcrypt format.
    pub fn is_legacy(hash: &str) -> bool {
        BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
