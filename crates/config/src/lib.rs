// Configuration Management
//
// This crate handles all configuration loading for the LexiMind API.
// It provides:
// - Configuration structs
// - Environment loading logic
// - Default configuration values
//
// The resulting `ApiConfig` is built once at startup and treated as read-only.

use thiserror::Error;

pub mod types;

// Re-export all configuration types
pub use types::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: &'static str },

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Main configuration loading interface
impl ApiConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Ok(Self {
            server: ServerConfig::from_lookup(&lookup),
            openrouter: OpenRouterConfig::from_lookup(&lookup)?,
            logging: LoggingConfig::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars = vars(pairs);
        ApiConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = load(&[("OPENROUTER_API_KEY", "sk-test")]).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.openrouter.api_key, "sk-test");
        assert_eq!(config.openrouter.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.openrouter.model, "openrouter/auto");
        assert_eq!(config.openrouter.referer, None);
        assert_eq!(config.openrouter.title.as_deref(), Some("LexiMind"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = load(&[("PORT", "8080")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingVar {
                name: "OPENROUTER_API_KEY"
            }
        );
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        assert!(load(&[("OPENROUTER_API_KEY", "")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("OPENROUTER_BASE_URL", "http://localhost:9000/v1"),
            ("OPENROUTER_MODEL", "meta-llama/llama-3-8b-instruct"),
            ("HTTP_REFERER", "https://leximind.dev"),
            ("X_TITLE", "Custom"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "json"),
            ("LOG_MODULE_SERVICES", "trace"),
        ])
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.openrouter.base_url, "http://localhost:9000/v1");
        assert_eq!(config.openrouter.model, "meta-llama/llama-3-8b-instruct");
        assert_eq!(
            config.openrouter.referer.as_deref(),
            Some("https://leximind.dev")
        );
        assert_eq!(config.openrouter.title.as_deref(), Some("Custom"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.logging.modules.get("services").map(String::as_str),
            Some("trace")
        );
    }

    #[test]
    fn test_invalid_log_format() {
        let err = load(&[("OPENROUTER_API_KEY", "sk-test"), ("LOG_FORMAT", "xml")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "LOG_FORMAT",
                ..
            }
        ));
    }
}
