//! Application configuration, read from the environment with defaults
//! suitable for local development.

use persona_graph::GraphConfig;
use serde::Deserialize;

/// Bearer-credential settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub secret_key: String,
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: "change-me-in-production".to_string(),
            token_ttl_minutes: 30,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_path: String,
    pub graph: GraphConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: "persona.db".to_string(),
            graph: GraphConfig::default(),
            auth: AuthConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database_path: std::env::var("PERSONA_DATABASE_PATH")
                .unwrap_or(defaults.database_path),
            graph: GraphConfig::from_env(),
            auth: AuthConfig {
                secret_key: std::env::var("SECRET_KEY").unwrap_or(defaults.auth.secret_key),
                token_ttl_minutes: env_parse(
                    "ACCESS_TOKEN_EXPIRE_MINUTES",
                    defaults.auth.token_ttl_minutes,
                ),
            },
            server: ServerConfig {
                host: std::env::var("PERSONA_HOST").unwrap_or(defaults.server.host),
                port: env_parse("PERSONA_PORT", defaults.server.port),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database_path, "persona.db");
        assert_eq!(config.auth.token_ttl_minutes, 30);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.graph.uri, "bolt://localhost:7687");
    }
}
