//! Per-destination activation and level configuration
//!
//! Destinations are configured once at process start from environment-style
//! key/value input. The published key names below are helpers for
//! microservices; every destination also exposes a `from_lookup`
//! constructor so tests can inject values without touching the process
//! environment.

use crate::core::{LogLevel, LoggerError, Result};

/// Console activity flag (boolean-like string, default `true`).
pub const CONSOLE_ACTIVE_ENV: &str = "LOG_CONSOLE_ACTIVE";

/// Console minimum level (default `DEBUG`).
pub const CONSOLE_MIN_LEVEL_ENV: &str = "LOG_CONSOLE_MIN_LEVEL";

/// HTTP collector endpoint URL. Required for the collector to be active.
pub const COLLECTOR_URL_ENV: &str = "LOG_COLLECTOR_URL";

/// HTTP collector API key. Required for the collector to be active.
pub const COLLECTOR_API_KEY_ENV: &str = "LOG_COLLECTOR_API_KEY";

/// HTTP collector minimum level (default `INFO`).
pub const COLLECTOR_MIN_LEVEL_ENV: &str = "LOG_COLLECTOR_MIN_LEVEL";

/// Chat webhook URL. Required for the webhook to be active.
pub const WEBHOOK_URL_ENV: &str = "LOG_WEBHOOK_URL";

/// Chat webhook minimum level (default `WARN`).
pub const WEBHOOK_MIN_LEVEL_ENV: &str = "LOG_WEBHOOK_MIN_LEVEL";

/// Lookup backed by the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Static per-destination configuration, derived once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationConfig {
    pub name: String,
    pub active: bool,
    pub min_level: LogLevel,
}

impl DestinationConfig {
    pub fn new(name: impl Into<String>, active: bool, min_level: LogLevel) -> Self {
        Self {
            name: name.into(),
            active,
            min_level,
        }
    }
}

/// Parse a boolean-like configuration string.
///
/// Unrecognized values are a startup configuration error rather than a
/// silent default.
pub(crate) fn parse_active(component: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(LoggerError::config(
            component,
            format!("invalid activity flag '{}'", raw),
        )),
    }
}

/// Resolve a minimum level from a lookup, failing fast on invalid input.
pub(crate) fn min_level_from(
    component: &str,
    key: &str,
    default: LogLevel,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<LogLevel> {
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|_| {
            LoggerError::config(component, format!("invalid minimum level '{}'", raw))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_active() {
        assert!(parse_active("Console", "true").unwrap());
        assert!(parse_active("Console", "ON").unwrap());
        assert!(!parse_active("Console", "0").unwrap());
        assert!(!parse_active("Console", "off").unwrap());
        assert!(parse_active("Console", "maybe").is_err());
    }

    #[test]
    fn test_min_level_default_and_override() {
        let level =
            min_level_from("Console", CONSOLE_MIN_LEVEL_ENV, LogLevel::Debug, |_| None).unwrap();
        assert_eq!(level, LogLevel::Debug);

        let level = min_level_from("Console", CONSOLE_MIN_LEVEL_ENV, LogLevel::Debug, |_| {
            Some("warn".to_string())
        })
        .unwrap();
        assert_eq!(level, LogLevel::Warn);
    }

    #[test]
    fn test_invalid_min_level_fails_fast() {
        let result = min_level_from("Webhook", WEBHOOK_MIN_LEVEL_ENV, LogLevel::Warn, |_| {
            Some("SHOUT".to_string())
        });
        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
