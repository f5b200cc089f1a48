//! Authentication primitives library
//!
//! Provides the building blocks for the two authentication strategies:
//! - Password hashing (Argon2id, with bcrypt verification for legacy hashes)
//! - Stateless bearer tokens (HMAC-signed JWT with expiry)
//! - Stateful sessions (opaque random identifiers held in memory)
//!
//! Services define their own user lookup and access policy on top of these.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", "HS256", Duration::minutes(30)).unwrap();
//! let issued = issuer.issue("alice", None).unwrap();
//! assert_eq!(issuer.resolve(&issued.access_token).unwrap(), "alice");
//! ```
//!
//! ## Sessions
//! ```
//! use auth::{SessionConfig, SessionStore};
//!
//! let store = SessionStore::new(SessionConfig::default()).unwrap();
//! let session = store.create("alice", None);
//! assert_eq!(store.resolve(&session.session_id).unwrap(), "alice");
//! ```

pub mod password;
pub mod session;
pub mod token;

// Re-export commonly used items
pub use password::HashScheme;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::Session;
pub use session::SessionConfig;
pub use session::SessionError;
pub use session::SessionStore;
pub use token::Claims;
pub use token::IssuedToken;
pub use token::TokenError;
pub use token::TokenIssuer;
