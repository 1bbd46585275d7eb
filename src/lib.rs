//! # Dispatch Logger
//!
//! A lightweight, leveled, structured-message logger. Messages are written
//! as templates with named placeholders, formatted into structured records,
//! and fanned out to pluggable destinations, each with its own minimum
//! level. Asynchronous deliveries are tracked so a caller can drain them
//! deterministically before process exit.
//!
//! ## Features
//!
//! - **Message templates**: `{Name}` and `{@Name}` placeholders with
//!   positional parameters and strict arity checking
//! - **Multiple Destinations**: console, HTTP log collector, chat webhook,
//!   and custom implementations of the [`Destination`] trait
//! - **Completion tracking**: every delivery yields a handle; `flush()`
//!   awaits all outstanding deliveries and never hangs
//! - **Ambient context**: process-wide or task-scoped correlation id,
//!   prefix, and suffix merged into every call
//!
//! ## Example
//!
//! ```
//! use dispatch_logger::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let logger = Logger::builder()
//!     .runtime_info(dispatch_logger::runtime_info!())
//!     .build();
//!
//! logger
//!     .info("User {Name} logged in", vec![serde_json::json!("ann")])
//!     .unwrap();
//! logger.flush().await;
//! # }
//! ```

pub mod core;
pub mod destinations;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::destinations::ConsoleDestination;
    #[cfg(feature = "network")]
    pub use crate::destinations::{ChatWebhookDestination, HttpCollectorDestination};
    pub use crate::core::{
        scoped_context, CallSite, CallerLocator, CompletionTracker, ContextConfig,
        ContextProvider, DeliveryHandle, Destination, ExceptionDetail, FormattedRecord, LogLevel,
        Logger, LoggerBuilder, LoggerError, Result, RuntimeInfo, TaskLocalContextProvider,
        DELIVERY_TIMEOUT,
    };
    pub use crate::destinations::DestinationConfig;
}

#[cfg(feature = "console")]
pub use destinations::ConsoleDestination;
#[cfg(feature = "network")]
pub use destinations::{ChatWebhookDestination, HttpCollectorDestination};
pub use core::{
    scoped_context, CallSite, CallerLocator, CompletionTracker, ContextConfig, ContextProvider,
    DeliveryHandle, Destination, ExceptionDetail, FormattedRecord, LogLevel, Logger,
    LoggerBuilder, LoggerError, Result, RuntimeInfo, TaskLocalContextProvider, DELIVERY_TIMEOUT,
};
pub use destinations::DestinationConfig;

#[doc(hidden)]
pub use serde_json::json as __json;
