//! Destination implementations

pub mod config;

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "network")]
pub mod http;
#[cfg(feature = "network")]
pub mod webhook;

pub use config::DestinationConfig;

#[cfg(feature = "console")]
pub use console::ConsoleDestination;

#[cfg(feature = "network")]
pub use http::HttpCollectorDestination;
#[cfg(feature = "network")]
pub use webhook::ChatWebhookDestination;

// Re-export the trait for convenience
pub use crate::core::Destination;
