//! Console destination

use super::config::{
    min_level_from, parse_active, DestinationConfig, CONSOLE_ACTIVE_ENV, CONSOLE_MIN_LEVEL_ENV,
};
use crate::core::{Destination, DeliveryHandle, FormattedRecord, LogLevel, Result};
use colored::Colorize;
use serde_json::Value;

/// Local sink writing colored lines to stdout/stderr.
///
/// Writes complete synchronously, so every handle it returns is already
/// settled.
pub struct ConsoleDestination {
    config: DestinationConfig,
    use_colors: bool,
}

impl ConsoleDestination {
    pub fn new() -> Self {
        Self {
            config: DestinationConfig::new("console", true, LogLevel::Debug),
            use_colors: true,
        }
    }

    /// Build from the process environment (`LOG_CONSOLE_*` keys).
    ///
    /// # Errors
    ///
    /// Fails on an unrecognized activity flag or minimum-level string.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(super::config::env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let active = match lookup(CONSOLE_ACTIVE_ENV) {
            Some(raw) => parse_active("Console", &raw)?,
            None => true,
        };
        let min_level = min_level_from("Console", CONSOLE_MIN_LEVEL_ENV, LogLevel::Debug, lookup)?;

        Ok(Self {
            config: DestinationConfig::new("console", active, min_level),
            use_colors: true,
        })
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, min_level: LogLevel) -> Self {
        self.config.min_level = min_level;
        self
    }

    /// Render a property value for the key=value tail, strings unquoted.
    fn format_value(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn format_line(&self, record: &FormattedRecord, level: LogLevel) -> String {
        let level_str = if self.use_colors {
            format!("{:8}", level.to_str())
                .color(level.color_code())
                .to_string()
        } else {
            format!("{:8}", level.to_str())
        };

        let mut line = format!(
            "[{}] [{}] {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            level_str,
            record.message
        );

        if !record.properties.is_empty() {
            let fields = record
                .properties
                .iter()
                .map(|(key, value)| format!("{}={}", key, Self::format_value(value)))
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(" | ");
            line.push_str(&fields);
        }

        if let Some(ref exception) = record.exception {
            line.push_str(" | ");
            line.push_str(&exception.render());
        }

        line
    }
}

impl Default for ConsoleDestination {
    fn default() -> Self {
        Self::new()
    }
}

impl Destination for ConsoleDestination {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn is_active(&self) -> bool {
        self.config.active
    }

    fn min_level(&self) -> LogLevel {
        self.config.min_level
    }

    fn log(&self, record: &FormattedRecord, level: LogLevel) -> DeliveryHandle {
        if !level.is_permitted(self.config.min_level) {
            return DeliveryHandle::settled(self.config.name.clone());
        }

        let line = self.format_line(record, level);

        // Error tiers go to stderr, everything else to stdout.
        if level >= LogLevel::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }

        DeliveryHandle::settled(self.config.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with_props() -> FormattedRecord {
        let mut record = FormattedRecord::new(LogLevel::Info, "hi {Who}", "hi ann");
        record.properties.insert("Who".to_string(), json!("ann"));
        record
    }

    #[test]
    fn test_from_lookup_defaults() {
        let console = ConsoleDestination::from_lookup(|_| None).unwrap();
        assert!(console.is_active());
        assert_eq!(console.min_level(), LogLevel::Debug);
        assert_eq!(console.name(), "console");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let console = ConsoleDestination::from_lookup(|key| match key {
            CONSOLE_ACTIVE_ENV => Some("false".to_string()),
            CONSOLE_MIN_LEVEL_ENV => Some("error".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(!console.is_active());
        assert_eq!(console.min_level(), LogLevel::Error);
    }

    #[test]
    fn test_invalid_level_is_startup_error() {
        let result = ConsoleDestination::from_lookup(|key| {
            (key == CONSOLE_MIN_LEVEL_ENV).then(|| "LOUD".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_below_min_level_settles_without_io() {
        let console = ConsoleDestination::new().with_min_level(LogLevel::Error);
        let handle = console.log(&record_with_props(), LogLevel::Info);
        assert!(handle.is_settled());
        assert_eq!(handle.name(), "console");
    }

    #[test]
    fn test_line_format_contains_fields_and_exception() {
        let console = ConsoleDestination::new().with_colors(false);
        let mut record = record_with_props();
        record.exception = Some(crate::core::ExceptionDetail {
            message: "boom".to_string(),
            chain: vec![],
        });

        let line = console.format_line(&record, LogLevel::Warn);
        assert!(line.contains("WARN"));
        assert!(line.contains("hi ann"));
        assert!(line.contains("Who=ann"));
        assert!(line.contains("boom"));
    }
}
