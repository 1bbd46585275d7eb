//! Structured record produced by template formatting

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::panic::Location;

/// Best-effort calling-site information.
///
/// Absence is never an error; destinations treat a missing call site as
/// "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    /// Capture the location of the caller of the annotated function.
    #[track_caller]
    #[must_use]
    pub fn capture() -> Self {
        let location = Location::caller();
        Self {
            file: location.file().to_string(),
            line: location.line(),
        }
    }
}

/// Renderable detail of an exception attached to a log call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionDetail {
    /// Top-level error message
    pub message: String,
    /// Messages of the `source()` chain, outermost first
    pub chain: Vec<String>,
}

impl ExceptionDetail {
    /// Build detail from any error, walking its source chain.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: error.to_string(),
            chain,
        }
    }

    /// One-line rendering used by text sinks.
    pub fn render(&self) -> String {
        if self.chain.is_empty() {
            self.message.clone()
        } else {
            format!("{} (caused by: {})", self.message, self.chain.join(" <- "))
        }
    }
}

/// The output of template formatting plus dispatcher enrichment.
///
/// Every placeholder in `template` has exactly one entry in `properties`,
/// keyed by the de-braced, de-sigiled name and holding the original,
/// un-stringified parameter value.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub template: String,
    pub message: String,
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(rename = "callSite", skip_serializing_if = "Option::is_none")]
    pub call_site: Option<CallSite>,
}

impl FormattedRecord {
    pub fn new(level: LogLevel, template: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            template: template.into(),
            message: message.into(),
            properties: BTreeMap::new(),
            exception: None,
            application: None,
            version: None,
            environment: None,
            context_id: None,
            call_site: None,
        }
    }
}

/// Escape line breaks and tabs so one log call stays one log line.
///
/// Prevents crafted parameter values from injecting fake entries into
/// line-oriented sinks.
pub(crate) fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
