use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Result of issuing an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed JWT
    pub access_token: String,
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Issues and resolves signed, expiring bearer tokens.
///
/// Tokens are stateless: validity depends only on the signature and the
/// `exp` claim, so nothing is recorded server-side and a token cannot be
/// revoked before it expires. Rotating the secret invalidates every token.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenIssuer {
    /// Minimum secret length, matching the HS256 output size.
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key (supplied externally, never hard-coded)
    /// * `algorithm` - HMAC algorithm name: "HS256", "HS384" or "HS512"
    /// * `default_ttl` - Lifetime applied when `issue` is called without one
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm is unknown or not HMAC-based
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8], algorithm: &str, default_ttl: Duration) -> Result<Self, TokenError> {
        let algorithm = match Algorithm::from_str(algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(TokenError::UnsupportedAlgorithm(algorithm.to_string())),
        };

        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            default_ttl,
        })
    }

    /// Lifetime applied to tokens issued without an explicit ttl.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a signed token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Username the token attests to
    /// * `ttl` - Token lifetime, `None` for the configured default
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<IssuedToken, TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(ttl.unwrap_or(self.default_ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let claims = Claims::new(subject, issued_at, expires_at);

        let access_token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    /// Resolve a token to the subject it attests to.
    ///
    /// The signature is checked before any claim is read; expiry is checked
    /// only once the claims are known to be authentic.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, unexpected algorithm, malformed encoding or missing claims
    /// * `ExpiredToken` - Authentic token whose `exp` has passed
    pub fn resolve(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is evaluated below without leeway so that it maps to its own error.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::InvalidToken)?
            .claims;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::ExpiredToken);
        }

        Ok(claims.sub)
    }
}
