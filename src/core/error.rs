//! Error types for the dispatch logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Placeholder count in a template does not match the parameter count.
    ///
    /// This is a caller bug: the call fails synchronously and nothing is
    /// dispatched to any destination.
    #[error("template expects {placeholders} parameter(s) but {params} were given: \"{template}\"")]
    TemplateArity {
        placeholders: usize,
        params: usize,
        template: String,
    },

    /// A level string did not map to a known severity
    #[error("invalid log level: '{value}'")]
    InvalidLevel { value: String },

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A destination failed to deliver a record.
    ///
    /// Never surfaced to logging callers; used inside spawned delivery
    /// tasks and reported through the stderr fallback.
    #[error("delivery to '{destination}' failed: {message}")]
    Delivery {
        destination: String,
        message: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a template arity error
    pub fn arity(placeholders: usize, params: usize, template: impl Into<String>) -> Self {
        LoggerError::TemplateArity {
            placeholders,
            params,
            template: template.into(),
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a delivery error
    pub fn delivery(destination: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Delivery {
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::arity(2, 1, "User {Name} from {IP}");
        assert!(matches!(err, LoggerError::TemplateArity { .. }));

        let err = LoggerError::config("HttpCollector", "invalid minimum level");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::delivery("webhook", "connection refused");
        assert!(matches!(err, LoggerError::Delivery { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::arity(2, 3, "User {Name} from {IP}");
        assert_eq!(
            err.to_string(),
            "template expects 2 parameter(s) but 3 were given: \"User {Name} from {IP}\""
        );

        let err = LoggerError::invalid_level("LOUD");
        assert_eq!(err.to_string(), "invalid log level: 'LOUD'");

        let err = LoggerError::delivery("collector", "HTTP 503");
        assert_eq!(err.to_string(), "delivery to 'collector' failed: HTTP 503");
    }
}
