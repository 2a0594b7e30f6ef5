//! Application configuration management
//!
//! Configuration is loaded from environment variables once at startup and
//! carried explicitly in [`crate::state::AppState`]. There is no global
//! configuration lookup; components receive what they need by reference.

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_FLASH_MODEL,
    DEFAULT_GEMINI_PRO_MODEL, DEFAULT_JUDGE_MAX_POLL_ATTEMPTS, DEFAULT_JUDGE_POLL_INTERVAL_MS,
    DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub judge: JudgeConfig,
    pub ai: AiConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// How long a request may wait for a pool connection
    pub acquire_timeout_secs: u64,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// External judge service (Judge0) configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub url: String,
    pub api_key: String,
    /// Delay between batch status polls
    pub poll_interval_ms: u64,
    /// Maximum number of status polls before returning indeterminate results
    pub max_poll_attempts: u32,
}

/// Generative model (Gemini) configuration
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub flash_model: String,
    pub pro_model: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
            ai: AiConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
            acquire_timeout_secs: env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("DATABASE_ACQUIRE_TIMEOUT_SECS".to_string())
                })?,
        })
    }

    /// Pool acquire timeout as a [`Duration`]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRY_HOURS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRY_HOURS".to_string()))?,
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("JUDGE0_API_URL")
                .map_err(|_| ConfigError::Missing("JUDGE0_API_URL".to_string()))?,
            api_key: env::var("JUDGE0_API_KEY")
                .map_err(|_| ConfigError::Missing("JUDGE0_API_KEY".to_string()))?,
            poll_interval_ms: env::var("JUDGE0_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| DEFAULT_JUDGE_POLL_INTERVAL_MS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE0_POLL_INTERVAL_MS".to_string()))?,
            max_poll_attempts: env::var("JUDGE0_MAX_POLL_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_JUDGE_MAX_POLL_ATTEMPTS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE0_MAX_POLL_ATTEMPTS".to_string()))?,
        })
    }

    /// Delay between polls as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl AiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env::var("GEMINI_API_KEY")
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY".to_string()))?,
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            flash_model: env::var("GEMINI_FLASH_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_FLASH_MODEL.to_string()),
            pro_model: env::var("GEMINI_PRO_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_PRO_MODEL.to_string()),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_database_acquire_timeout() {
        let database = DatabaseConfig {
            url: "postgres://localhost/app".to_string(),
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            acquire_timeout_secs: 7,
        };
        assert_eq!(database.acquire_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_judge_poll_interval() {
        let judge = JudgeConfig {
            url: "https://judge0.example.com".to_string(),
            api_key: "key".to_string(),
            poll_interval_ms: 250,
            max_poll_attempts: 10,
        };
        assert_eq!(judge.poll_interval(), Duration::from_millis(250));
    }
}
