use std::env;

use auth::SessionConfig;
use auth::TokenIssuer;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// One year.
pub const MAX_EXPIRATION_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub token: TokenConfig,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
    #[serde(default = "default_id_bytes")]
    pub id_bytes: usize,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure`; enable whenever served over TLS.
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

/// User provisioned into the in-memory directory at start-up.
#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    pub hashed_password: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            expiration_minutes: default_expiration_minutes(),
            id_bytes: default_id_bytes(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    30
}

fn default_id_bytes() -> usize {
    SessionConfig::DEFAULT_ID_BYTES
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would weaken either strategy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.secret.len() < TokenIssuer::MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "token.secret must be at least {} bytes",
                TokenIssuer::MIN_SECRET_LENGTH
            )));
        }

        if !matches!(self.token.algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(ConfigError::Message(format!(
                "token.algorithm must be an HMAC algorithm, got {}",
                self.token.algorithm
            )));
        }

        if self.session.id_bytes < SessionConfig::MIN_ID_BYTES {
            return Err(ConfigError::Message(format!(
                "session.id_bytes must be at least {}",
                SessionConfig::MIN_ID_BYTES
            )));
        }

        let lifetimes = 1..=MAX_EXPIRATION_MINUTES;
        if !lifetimes.contains(&self.token.expiration_minutes)
            || !lifetimes.contains(&self.session.expiration_minutes)
        {
            return Err(ConfigError::Message(format!(
                "expiration_minutes must be between 1 and {}",
                MAX_EXPIRATION_MINUTES
            )));
        }

        if self.session.sweep_interval_seconds == 0 {
            return Err(ConfigError::Message(
                "session.sweep_interval_seconds must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
