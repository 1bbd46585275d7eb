//! Destination trait for log delivery sinks

use super::log_level::LogLevel;
use super::record::FormattedRecord;
use super::tracker::DeliveryHandle;

/// A pluggable delivery sink (console, HTTP collector, chat webhook, ...).
///
/// The dispatcher checks [`is_active`] and skips inactive destinations
/// entirely; implementations only gate on their own minimum level. `log`
/// must always return a handle: below-minimum calls return an
/// already-settled no-op handle without attempting delivery, and
/// asynchronous sends are spawned so the caller is never suspended. The
/// record is borrowed and must not be mutated.
///
/// [`is_active`]: Destination::is_active
pub trait Destination: Send + Sync {
    /// Destination name, echoed on every handle it produces.
    fn name(&self) -> &str;

    /// Whether this destination participates in dispatch at all.
    fn is_active(&self) -> bool;

    /// Minimum severity this destination delivers.
    fn min_level(&self) -> LogLevel;

    /// Deliver a record, returning a handle that settles when the
    /// underlying operation reaches a terminal state.
    fn log(&self, record: &FormattedRecord, level: LogLevel) -> DeliveryHandle;
}
