//! Basic logger usage example
//!
//! Demonstrates template logging to the console destination, level
//! filtering, ambient context, and draining deliveries with flush.
//!
//! Run with: cargo run --example basic_usage

use dispatch_logger::prelude::*;
use dispatch_logger::{info, runtime_info, warn};
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    println!("=== Dispatch Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .destination(ConsoleDestination::new())
        .runtime_info(runtime_info!())
        .build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", vec![])?;
    logger.info("This is an info message", vec![])?;
    logger.warn("This is a warning message", vec![])?;
    logger.error("This is an error message", vec![])?;
    logger.critical("This is a critical message", vec![])?;
    logger.fatal("This is a fatal message", vec![])?;

    println!("\n2. Message templates with parameters:");
    logger.info(
        "User {Username} logged in from {@Meta}",
        vec![json!("ann"), json!({ "ip": "10.0.0.1" })],
    )?;
    info!(logger, "Order {OrderId} total {Total}", 1042, 99.95)?;

    println!("\n3. Minimum level per destination:");
    let filtered = Logger::builder()
        .destination(ConsoleDestination::new().with_min_level(LogLevel::Warn))
        .build();
    filtered.debug("Debug message (hidden)", vec![])?;
    filtered.info("Info message (hidden)", vec![])?;
    warn!(filtered, "Warning message (visible)")?;

    println!("\n4. Ambient context:");
    logger.configure(
        ContextConfig::new()
            .with_context_id("req-42")
            .with_prefix("[checkout]"),
    );
    logger.info("Payment captured for {OrderId}", vec![json!(1042)])?;
    logger.configure(ContextConfig::new());

    println!("\n5. Reporting an error with its cause chain:");
    let error = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    logger.error_with_exception(&error, "sync to {Host} failed", vec![json!("db-1")])?;

    // Drain any asynchronous deliveries before exit.
    logger.flush().await;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
