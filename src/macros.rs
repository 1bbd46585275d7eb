//! Logging macros for ergonomic template calls.
//!
//! The macros wrap each parameter with `serde_json::json!`, so plain
//! strings, numbers, and struct literals all work as template parameters.
//!
//! # Examples
//!
//! ```
//! use dispatch_logger::prelude::*;
//! use dispatch_logger::info;
//!
//! let logger = Logger::builder().build();
//!
//! info!(logger, "Server started").unwrap();
//!
//! let port = 8080;
//! info!(logger, "Listening on port {Port}", port).unwrap();
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use dispatch_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use dispatch_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code {Code}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $param:expr)* $(,)?) => {
        $logger.log($level, $template, vec![$($crate::__json!($param)),*])
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $template:expr $(, $param:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $template $(, $param)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $template:expr $(, $param:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $template $(, $param)*)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $template:expr $(, $param:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $template $(, $param)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $template:expr $(, $param:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $template $(, $param)*)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $template:expr $(, $param:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $template $(, $param)*)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $template:expr $(, $param:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $template $(, $param)*)
    };
}

/// Build a [`crate::RuntimeInfo`] using the embedding crate's manifest
/// name and version as fallbacks for the `APP_NAME` / `APP_VERSION`
/// environment variables.
///
/// The `env!` expansion happens at the caller's compile site, so the
/// values come from the application's own `Cargo.toml`.
#[macro_export]
macro_rules! runtime_info {
    () => {
        $crate::RuntimeInfo::from_manifest(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    };
}
