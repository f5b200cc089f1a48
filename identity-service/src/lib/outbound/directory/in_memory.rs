use std::collections::HashMap;

use async_trait::async_trait;
use auth::HashScheme;

use crate::config::UserConfig;
use crate::domain::user::models::UserRecord;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::DirectoryError;

/// User directory backed by records provisioned at start-up.
///
/// Records are immutable once loaded and must all be hashed under one
/// scheme. Stands in for a durable user store.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<Username, UserRecord>,
    hash_scheme: Option<HashScheme>,
}

impl InMemoryUserDirectory {
    /// Build a directory from user records.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Two records share a username
    /// * `UnrecognizedHash` - A stored hash is neither Argon2 nor bcrypt
    /// * `MixedHashSchemes` - Stored hashes differ in algorithm or cost
    pub fn from_records(records: Vec<UserRecord>) -> Result<Self, DirectoryError> {
        let mut users = HashMap::with_capacity(records.len());
        let mut hash_scheme: Option<HashScheme> = None;

        for record in records {
            if users.contains_key(&record.username) {
                return Err(DirectoryError::DuplicateUsername(record.username.to_string()));
            }

            let scheme = HashScheme::of(&record.hashed_password)
                .map_err(|_| DirectoryError::UnrecognizedHash(record.username.to_string()))?;
            match &hash_scheme {
                Some(expected) if *expected != scheme => {
                    return Err(DirectoryError::MixedHashSchemes(record.username.to_string()));
                }
                Some(_) => {}
                None => hash_scheme = Some(scheme),
            }

            users.insert(record.username.clone(), record);
        }

        Ok(Self { users, hash_scheme })
    }

    /// Build a directory from configured users.
    ///
    /// # Errors
    /// * `InvalidUsername` - A configured username fails validation
    /// * `DuplicateUsername` - Two configured users share a username
    /// * `UnrecognizedHash` / `MixedHashSchemes` - See [`Self::from_records`]
    pub fn from_config(users: &[UserConfig]) -> Result<Self, DirectoryError> {
        let records = users
            .iter()
            .map(|user| -> Result<UserRecord, DirectoryError> {
                Ok(UserRecord {
                    username: Username::new(user.username.clone())?,
                    email: user.email.clone(),
                    full_name: user.full_name.clone(),
                    disabled: user.disabled,
                    hashed_password: user.hashed_password.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.users.get(username).cloned())
    }

    fn hash_scheme(&self) -> Option<HashScheme> {
        self.hash_scheme.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_config(username: &str, hashed_password: &str) -> UserConfig {
        UserConfig {
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            full_name: Some("John Doe".to_string()),
            disabled: false,
            hashed_password: hashed_password.to_string(),
        }
    }

    fn bcrypt_hash(cost: u32) -> String {
        bcrypt::hash("password", cost).unwrap()
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let directory =
            InMemoryUserDirectory::from_config(&[user_config("johndoe", &bcrypt_hash(4))])
                .unwrap();

        let found = directory
            .find_by_username(&Username::new("johndoe".to_string()).unwrap())
            .await
            .unwrap()
            .expect("User not found");
        assert_eq!(found.full_name.as_deref(), Some("John Doe"));

        let missing = directory
            .find_by_username(&Username::new("janedoe".to_string()).unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_from_config_rejects_duplicates() {
        let hash = bcrypt_hash(4);
        let result = InMemoryUserDirectory::from_config(&[
            user_config("johndoe", &hash),
            user_config("johndoe", &hash),
        ]);

        assert!(matches!(result, Err(DirectoryError::DuplicateUsername(_))));
    }

    #[test]
    fn test_from_config_rejects_invalid_username() {
        let result = InMemoryUserDirectory::from_config(&[user_config("x", &bcrypt_hash(4))]);

        assert!(matches!(result, Err(DirectoryError::InvalidUsername(_))));
    }

    #[test]
    fn test_from_config_rejects_unrecognized_hash() {
        let result = InMemoryUserDirectory::from_config(&[user_config("johndoe", "plaintext")]);

        assert!(matches!(result, Err(DirectoryError::UnrecognizedHash(_))));
    }

    #[test]
    fn test_hash_scheme_is_shared() {
        let directory = InMemoryUserDirectory::from_config(&[
            user_config("johndoe", &bcrypt_hash(4)),
            user_config("janedoe", &bcrypt_hash(4)),
        ])
        .unwrap();

        assert_eq!(directory.hash_scheme(), Some(HashScheme::Bcrypt { cost: 4 }));
    }

    #[test]
    fn test_from_config_rejects_mixed_costs() {
        let result = InMemoryUserDirectory::from_config(&[
            user_config("johndoe", &bcrypt_hash(4)),
            user_config("janedoe", &bcrypt_hash(5)),
        ]);

        assert!(matches!(result, Err(DirectoryError::MixedHashSchemes(u)) if u == "janedoe"));
    }

    #[test]
    fn test_from_config_rejects_mixed_algorithms() {
        let argon2 = auth::PasswordHasher::new().hash("password").unwrap();
        let result = InMemoryUserDirectory::from_config(&[
            user_config("johndoe", &argon2),
            user_config("janedoe", &bcrypt_hash(4)),
        ]);

        assert!(matches!(result, Err(DirectoryError::MixedHashSchemes(_))));
    }

    #[test]
    fn test_empty_directory() {
        let directory = InMemoryUserDirectory::from_config(&[]).unwrap();
        assert!(directory.is_empty());
        assert!(directory.hash_scheme().is_none());
    }
}
