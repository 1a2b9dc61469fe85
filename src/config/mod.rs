use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Overridable so tests can point the proxy at a local stub.
    pub api_base: String,
}

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

impl AppConfig {
    /// Build configuration from the process environment. Call after
    /// `dotenvy::dotenv()` so a local `.env` is picked up.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            server: ServerConfig {
                port: env_parse("PORT", 5000),
            },
            database: DatabaseConfig {
                url,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10),
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: env_parse("JWT_EXPIRY_HOURS", 24),
            },
            github: GithubConfig {
                client_id: env::var("GITHUB_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("GITHUB_CLIENT_SECRET").unwrap_or_default(),
                api_base: env::var("GITHUB_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_GITHUB_API_BASE.to_string()),
            },
        })
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_applies_defaults() {
        env::set_var("DATABASE_URL", "postgres://localhost/profiles");
        env::set_var("JWT_SECRET", "secret");

        let config = AppConfig::from_env().expect("config");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.security.jwt_expiry_hours, 24);
        assert_eq!(config.github.api_base, DEFAULT_GITHUB_API_BASE);
        assert!(config.github.client_id.is_empty());
    }
}
