//! Core logger types and traits

pub mod context;
pub mod destination;
pub mod dispatcher;
pub mod error;
pub mod log_level;
pub mod record;
pub mod runtime;
pub mod template;
pub mod tracker;

pub use context::{scoped_context, ContextConfig, ContextProvider, TaskLocalContextProvider};
pub use destination::Destination;
pub use dispatcher::{Logger, LoggerBuilder};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use record::{CallSite, ExceptionDetail, FormattedRecord};
pub use runtime::{CallerLocator, RuntimeInfo, DEFAULT_ENVIRONMENT};
pub use template::{format_template, NULL_SENTINEL};
pub use tracker::{CompletionTracker, DeliveryHandle, DELIVERY_TIMEOUT};
