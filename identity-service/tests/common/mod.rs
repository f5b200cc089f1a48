use std::sync::Arc;

use auth::PasswordHasher;
use auth::SessionConfig;
use auth::SessionStore;
use auth::TokenIssuer;
use identity_service::config::UserConfig;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::inbound::http::router::SessionCookie;
use identity_service::outbound::directory::InMemoryUserDirectory;

pub const TOKEN_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const SESSION_COOKIE: &str = "session_id";
pub const ACTIVE_USER: &str = "johndoe";
pub const DISABLED_USER: &str = "janedoe";
pub const PASSWORD: &str = "correctpw";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_issuer: Arc<TokenIssuer>,
    pub session_store: Arc<SessionStore>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let hashed_password = PasswordHasher::new()
            .hash(PASSWORD)
            .expect("Failed to hash test password");

        let directory = Arc::new(
            InMemoryUserDirectory::from_config(&[
                UserConfig {
                    username: ACTIVE_USER.to_string(),
                    email: Some("johndoe@example.com".to_string()),
                    full_name: Some("John Doe".to_string()),
                    disabled: false,
                    hashed_password: hashed_password.clone(),
                },
                UserConfig {
                    username: DISABLED_USER.to_string(),
                    email: Some("janedoe@example.com".to_string()),
                    full_name: Some("Jane Doe".to_string()),
                    disabled: true,
                    hashed_password,
                },
            ])
            .expect("Failed to build user directory"),
        );

        let token_issuer = Arc::new(
            TokenIssuer::new(TOKEN_SECRET, "HS256", chrono::Duration::minutes(30))
                .expect("Failed to create token issuer"),
        );
        let session_store = Arc::new(
            SessionStore::new(SessionConfig::default()).expect("Failed to create session store"),
        );

        let auth_service = Arc::new(
            AuthService::new(
                directory,
                Arc::clone(&token_issuer),
                Arc::clone(&session_store),
            )
            .expect("Failed to create auth service"),
        );

        let router = create_router(
            auth_service,
            SessionCookie {
                name: SESSION_COOKIE.to_string(),
                secure: false,
            },
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: Self::client(),
            token_issuer,
            session_store,
        }
    }

    /// Fresh client with its own cookie jar
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create reqwest client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Submit the login form to one of the auth endpoints
    pub async fn submit_login(
        &self,
        client: &reqwest::Client,
        path: &str,
        username: &str,
        password: &str,
    ) -> reqwest::Response {
        client
            .post(self.url(path))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Obtain a bearer token for the given credentials
    pub async fn access_token(&self, username: &str, password: &str) -> String {
        let response = self
            .submit_login(&self.api_client, "/api/auth/token", username, password)
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}
