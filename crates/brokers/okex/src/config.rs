use okbridge_core::ExchangeError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const OKEX_HTTP_URL: &str = "https://www.okex.com";

/// Which exchange environment requests go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    /// Simulated trading. Requests carry the `x-simulated-trading` header.
    Demo,
}

/// Configuration for the OKEx REST client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OkexConfig {
    pub environment: Environment,
    /// Base URL for live trading.
    pub production_url: String,
    /// Base URL for simulated trading.
    pub demo_url: String,
}

impl Default for OkexConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            production_url: OKEX_HTTP_URL.to_string(),
            demo_url: OKEX_HTTP_URL.to_string(),
        }
    }
}

impl OkexConfig {
    pub fn demo() -> Self {
        Self {
            environment: Environment::Demo,
            ..Default::default()
        }
    }

    /// Base URL for the configured environment, without a trailing slash.
    pub fn base_url(&self) -> &str {
        let url = match self.environment {
            Environment::Production => &self.production_url,
            Environment::Demo => &self.demo_url,
        };
        url.trim_end_matches('/')
    }

    pub fn is_demo(&self) -> bool {
        self.environment == Environment::Demo
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ExchangeError> {
        toml::from_str(s).map_err(|e| ExchangeError::Config(e.to_string()))
    }

    /// Load from a TOML file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExchangeError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExchangeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_production() {
        let config = OkexConfig::default();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.base_url(), "https://www.okex.com");
        assert!(!config.is_demo());
    }

    #[test]
    fn test_environment_selects_url() {
        let config = OkexConfig::from_toml_str(
            r#"
            environment = "demo"
            production_url = "https://live.example.com"
            demo_url = "https://paper.example.com/"
            "#,
        )
        .unwrap();
        assert!(config.is_demo());
        assert_eq!(config.base_url(), "https://paper.example.com");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = OkexConfig::from_toml_str(r#"production_url = "http://127.0.0.1:9000""#).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.demo_url, OKEX_HTTP_URL);
    }

    #[test]
    fn test_unknown_environment_is_config_error() {
        let err = OkexConfig::from_toml_str(r#"environment = "staging""#).unwrap_err();
        assert!(matches!(err, ExchangeError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = OkexConfig::load("/nonexistent/okbridge.toml").unwrap_err();
        assert!(matches!(err, ExchangeError::Config(_)));
    }
}
