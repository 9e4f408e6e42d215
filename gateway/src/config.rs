//! Configuration for the gateway.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure for the gateway.
///
/// Configuration sources (in order of precedence):
/// 1. Environment variables (GATEWAY__SECTION__KEY format)
/// 2. config.toml file (if present)
/// 3. Built-in defaults
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub docker: DockerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Expected bearer API key, constant for the process lifetime.
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per credential within the window.
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
    /// Sliding window width in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
            window_secs: default_window_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the JSON model catalog declaration.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
    /// Container runtime binary to invoke.
    #[serde(default = "default_docker_binary")]
    pub binary: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary: default_docker_binary(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_api_key() -> String {
    "sk-default-key".to_string()
}
fn default_requests_per_minute() -> u32 {
    60
}
fn default_window_secs() -> u64 {
    60
}
fn default_catalog_path() -> String {
    "config/models.json".to_string()
}
fn default_docker_binary() -> String {
    "docker".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_config() {
        let api = ApiConfig::default();
        assert_eq!(api.host, "0.0.0.0");
        assert_eq!(api.port, 8000);
    }

    #[test]
    fn test_default_rate_limit_config() {
        let limit = RateLimitConfig::default();
        assert_eq!(limit.requests_per_minute, 60);
        assert_eq!(limit.window_secs, 60);
    }

    #[test]
    fn test_default_auth_key() {
        let auth = AuthConfig::default();
        assert_eq!(auth.api_key, "sk-default-key");
    }

    #[test]
    fn test_empty_sources_produce_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.docker.binary, "docker");
        assert_eq!(config.catalog.path, "config/models.json");
    }
}
