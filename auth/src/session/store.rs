use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::SessionError;

/// Server-side session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque identifier handed to the client
    pub session_id: String,
    /// Username the session was opened for
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session has reached its expiration time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session lifetime and identifier policy.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Lifetime applied when `create` is called without one
    pub ttl: Duration,
    /// Random bytes per identifier (rendered as twice as many hex characters)
    pub id_bytes: usize,
}

impl SessionConfig {
    pub const MIN_ID_BYTES: usize = 16;
    pub const DEFAULT_ID_BYTES: usize = 32;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(30),
            id_bytes: Self::DEFAULT_ID_BYTES,
        }
    }
}

/// In-memory session store.
///
/// Maps opaque identifiers to usernames. Expiry is lazy: an expired entry is
/// dropped when it is looked up, or by an explicit `purge_expired` sweep.
/// State is process-local and lost on restart.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    config: SessionConfig,
}

impl SessionStore {
    /// Create an empty session store.
    ///
    /// # Errors
    /// * `WeakIdentifier` - `id_bytes` is below 16 (128 bits)
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        if config.id_bytes < SessionConfig::MIN_ID_BYTES {
            return Err(SessionError::WeakIdentifier {
                min: SessionConfig::MIN_ID_BYTES,
                actual: config.id_bytes,
            });
        }

        Ok(Self {
            sessions: Mutex::new(HashMap::new()),
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Open a session for a username.
    ///
    /// # Arguments
    /// * `username` - Username the session attests to
    /// * `ttl` - Session lifetime, `None` for the configured default
    ///
    /// # Returns
    /// The stored session, including its freshly generated identifier
    pub fn create(&self, username: &str, ttl: Option<Duration>) -> Session {
        self.create_with(username, ttl, || self.generate_id())
    }

    fn create_with(
        &self,
        username: &str,
        ttl: Option<Duration>,
        mut generate_id: impl FnMut() -> String,
    ) -> Session {
        let created_at = Utc::now();
        let expires_at = created_at
            .checked_add_signed(ttl.unwrap_or(self.config.ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        // Uniqueness check and insert happen under the same lock.
        let mut sessions = self.sessions.lock();
        let session_id = loop {
            let candidate = generate_id();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };

        let session = Session {
            session_id: session_id.clone(),
            username: username.to_string(),
            created_at,
            expires_at,
        };
        sessions.insert(session_id, session.clone());

        session
    }

    fn generate_id(&self) -> String {
        let mut bytes = vec![0u8; self.config.id_bytes];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Resolve a session identifier to its username.
    ///
    /// # Errors
    /// * `InvalidSession` - Identifier is unknown (never issued, revoked, or already expired)
    /// * `ExpiredSession` - Identifier is known but past its lifetime; the entry is dropped
    pub fn resolve(&self, session_id: &str) -> Result<String, SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock();

        let session = sessions
            .get(session_id)
            .ok_or(SessionError::InvalidSession)?;

        if !session.is_expired(now) {
            return Ok(session.username.clone());
        }

        sessions.remove(session_id);
        Err(SessionError::ExpiredSession)
    }

    /// Remove a session. Returns whether it existed.
    pub fn revoke(&self, session_id: &str) -> bool {
        self.sessions.lock().remove(session_id).is_some()
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    /// Drop every session.
    pub fn clear(&self) {
        self.sessions.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
