use std::{collections::HashMap, fmt, str::FromStr};

use crate::ConfigError;

pub const DEFAULT_PORT: u16 = 5050;
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openrouter/auto";
pub const DEFAULT_TITLE: &str = "LexiMind";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub openrouter: OpenRouterConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_port(lookup("PORT").as_deref()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Parse a listening port, falling back to [`DEFAULT_PORT`] for anything that
/// is not a positive whole number in range.
///
/// Decimal notation is accepted, so `8080.0` and `1e3` name ports 8080 and 1000.
pub fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| {
            n.is_finite() && n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(u16::MAX)
        })
        .map(|n| n as u16)
        .unwrap_or(DEFAULT_PORT)
}

/// Upstream completion provider settings (OpenRouter or any OpenAI-compatible API)
#[derive(Clone)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub base_url: String,
    /// Model used when a request does not name one
    pub model: String,
    /// Sent as `HTTP-Referer` for provider-side attribution
    pub referer: Option<String>,
    /// Sent as `X-Title` for provider-side attribution
    pub title: Option<String>,
}

impl OpenRouterConfig {
    pub(crate) fn from_lookup(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: lookup("OPENROUTER_API_KEY").ok_or(ConfigError::MissingVar {
                name: "OPENROUTER_API_KEY",
            })?,
            base_url: lookup("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            referer: lookup("HTTP_REFERER"),
            title: Some(lookup("X_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string())),
        })
    }

    /// Build a config pointing at `base_url` with no attribution headers
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            referer: None,
            title: None,
        }
    }
}

impl fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown log format '{other}', expected pretty, compact or json"
            )),
        }
    }
}

/// Logging Configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    pub(crate) fn from_lookup(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut modules = HashMap::new();

        // Load module-specific log levels
        for (var, module) in [
            ("LOG_MODULE_API", "api"),
            ("LOG_MODULE_SERVICES", "services"),
            ("LOG_MODULE_INFERENCE_PROVIDERS", "inference_providers"),
        ] {
            if let Some(level) = lookup(var) {
                modules.insert(module.to_string(), level);
            }
        }

        let format = match lookup("LOG_FORMAT") {
            Some(raw) => raw
                .parse()
                .map_err(|reason| ConfigError::InvalidValue {
                    name: "LOG_FORMAT",
                    reason,
                })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format,
            modules,
        })
    }

    /// Filter directive string understood by `tracing_subscriber::EnvFilter`
    pub fn filter_directive(&self) -> String {
        let mut filter = self.level.clone();
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort();
        for (module, level) in modules {
            filter.push_str(&format!(",{module}={level}"));
        }
        filter
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            modules: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None), 5050);
        assert_eq!(parse_port(Some("8080")), 8080);
        assert_eq!(parse_port(Some(" 3000 ")), 3000);
        assert_eq!(parse_port(Some("0")), 5050);
        assert_eq!(parse_port(Some("-1")), 5050);
        assert_eq!(parse_port(Some("70000")), 5050);
        assert_eq!(parse_port(Some("12.5")), 5050);
        assert_eq!(parse_port(Some("abc")), 5050);
        assert_eq!(parse_port(Some("65535")), 65535);
        assert_eq!(parse_port(Some("65536")), 5050);
    }

    #[test]
    fn test_parse_port_accepts_decimal_notation() {
        assert_eq!(parse_port(Some("8080.0")), 8080);
        assert_eq!(parse_port(Some("1e3")), 1000);
        assert_eq!(parse_port(Some("0.0")), 5050);
        assert_eq!(parse_port(Some("inf")), 5050);
        assert_eq!(parse_port(Some("NaN")), 5050);
        assert_eq!(parse_port(Some("1e10")), 5050);
    }

    #[test]
    fn test_api_key_is_redacted() {
        let config = OpenRouterConfig::new("sk-secret", "http://localhost");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_filter_directive() {
        let mut logging = LoggingConfig::default();
        logging
            .modules
            .insert("services".to_string(), "debug".to_string());
        logging.modules.insert("api".to_string(), "trace".to_string());
        assert_eq!(logging.filter_directive(), "info,api=trace,services=debug");
    }
}
