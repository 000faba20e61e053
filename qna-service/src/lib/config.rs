use std::env;
use std::time::Duration;

use auth::TokenStrategy;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub password: PasswordConfig,
    pub cache: CacheConfig,
    pub audit: AuditConfig,
    #[serde(default)]
    pub cookie: CookieConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    #[serde(default)]
    pub strategy: TokenStrategy,
    pub secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuditConfig {
    pub brokers: String,
    pub topic: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CookieConfig {
    /// Mark session cookies `Secure` (HTTPS only)
    #[serde(default)]
    pub secure: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl TokenConfig {
    /// Zero when out of range; `Config::validate` rejects such values.
    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_minutes(self.access_token_ttl_minutes)
            .unwrap_or_else(chrono::Duration::zero)
    }

    /// Zero when out of range; `Config::validate` rejects such values.
    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_days(self.refresh_token_ttl_days)
            .unwrap_or_else(chrono::Duration::zero)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_ttl_minutes <= 0
            || chrono::Duration::try_minutes(self.access_token_ttl_minutes).is_none()
        {
            return Err(ConfigError::Message(format!(
                "token.access_token_ttl_minutes must be a positive number of minutes, got {}",
                self.access_token_ttl_minutes
            )));
        }
        if self.refresh_token_ttl_days <= 0
            || chrono::Duration::try_days(self.refresh_token_ttl_days).is_none()
        {
            return Err(ConfigError::Message(format!(
                "token.refresh_token_ttl_days must be a positive number of days, got {}",
                self.refresh_token_ttl_days
            )));
        }
        Ok(())
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize but cannot be used.
    ///
    /// # Errors
    /// * `ConfigError::Message` - A lifetime or timeout is zero, negative or out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.token.validate()?;

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            return Err(ConfigError::Message(
                "cache.ttl_seconds must be positive when the cache is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
