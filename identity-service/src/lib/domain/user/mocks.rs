use async_trait::async_trait;
use auth::HashScheme;
use mockall::mock;

use crate::domain::user::models::UserRecord;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::DirectoryError;

mock! {
    pub TestUserDirectory {}

    #[async_trait]
    impl UserDirectory for TestUserDirectory {
        async fn find_by_username(&self, username: &Username) -> Result<Option<UserRecord>, DirectoryError>;
        fn hash_scheme(&self) -> Option<HashScheme>;
    }
}

/// Directory mock whose stored passwords share the scheme of `hashed_password`.
pub fn directory_for(hashed_password: &str) -> MockTestUserDirectory {
    let scheme = HashScheme::of(hashed_password).ok();

    let mut directory = MockTestUserDirectory::new();
    directory.expect_hash_scheme().return_const(scheme);
    directory
}

/// Build a user record with example contact details.
pub fn record(username: &str, hashed_password: &str, disabled: bool) -> UserRecord {
    UserRecord {
        username: Username::new(username.to_string()).unwrap(),
        email: Some(format!("{}@example.com", username)),
        full_name: None,
        disabled,
        hashed_password: hashed_password.to_string(),
    }
}
