use argon2::password_hash::PasswordHash;
use argon2::Algorithm;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use super::hasher::PasswordHasher;

/// Algorithm and cost parameters of a stored hash, without salt or digest.
///
/// Two hashes with the same scheme cost the same to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashScheme {
    Argon2 {
        algorithm: Algorithm,
        version: Version,
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
        output_len: usize,
    },
    Bcrypt {
        cost: u32,
    },
}

impl HashScheme {
    /// Read the scheme of a stored hash.
    ///
    /// # Errors
    /// * `UnrecognizedHash` - Neither a bcrypt string nor an Argon2 PHC string
    pub fn of(hash: &str) -> Result<Self, PasswordError> {
        if PasswordHasher::is_legacy(hash) {
            let parts = hash
                .parse::<bcrypt::HashParts>()
                .map_err(|e| PasswordError::UnrecognizedHash(e.to_string()))?;

            return Ok(Self::Bcrypt {
                cost: parts.get_cost(),
            });
        }

        let unrecognized = |e: argon2::password_hash::Error| {
            PasswordError::UnrecognizedHash(e.to_string())
        };

        let parsed = PasswordHash::new(hash).map_err(unrecognized)?;
        let algorithm = Algorithm::try_from(parsed.algorithm).map_err(unrecognized)?;
        let version = match parsed.version {
            Some(version) => Version::try_from(version)
                .map_err(|e| PasswordError::UnrecognizedHash(e.to_string()))?,
            None => Version::default(),
        };
        let params = Params::try_from(&parsed).map_err(unrecognized)?;

        Ok(Self::Argon2 {
            algorithm,
            version,
            m_cost: params.m_cost(),
            t_cost: params.t_cost(),
            p_cost: params.p_cost(),
            output_len: params.output_len().unwrap_or(Params::DEFAULT_OUTPUT_LEN),
        })
    }
}

impl Default for HashScheme {
    /// The scheme `PasswordHasher::hash` produces.
    fn default() -> Self {
        Self::Argon2 {
            algorithm: Algorithm::Argon2id,
            version: Version::V0x13,
            m_cost: Params::DEFAULT_M_COST,
            t_cost: Params::DEFAULT_T_COST,
            p_cost: Params::DEFAULT_P_COST,
            output_len: Params::DEFAULT_OUTPUT_LEN,
        }
    }
}
