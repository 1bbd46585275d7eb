//! Logger core: formatting, enrichment, and destination fan-out
//!
//! One dispatch is synchronous up through handle creation: format the
//! template, enrich the record with runtime and context data, invoke every
//! active destination in registration order, and push the returned handles
//! into the completion tracker. Only `flush()` suspends.

use super::{
    context::{ContextConfig, ContextProvider},
    destination::Destination,
    error::Result,
    log_level::LogLevel,
    record::{CallSite, ExceptionDetail, FormattedRecord},
    runtime::{CallerLocator, RuntimeInfo},
    template::format_template,
    tracker::CompletionTracker,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::error::Error;
use std::sync::Arc;

pub struct Logger {
    destinations: Vec<Arc<dyn Destination>>,
    tracker: Arc<CompletionTracker>,
    runtime: RuntimeInfo,
    context: RwLock<ContextConfig>,
    context_provider: RwLock<Option<Arc<dyn ContextProvider>>>,
    caller_locator: RwLock<Option<Arc<dyn CallerLocator>>>,
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Replace the process-wide context.
    ///
    /// The supplied value is stored wholesale: a field given as `None`
    /// clears any previous value, matching partial-update semantics where
    /// an omitted field resets.
    pub fn configure(&self, config: ContextConfig) {
        *self.context.write() = config;
    }

    /// Current process-wide context (ignores any installed provider).
    pub fn context(&self) -> ContextConfig {
        self.context.read().clone()
    }

    /// Install a per-logical-request context source.
    ///
    /// While installed it takes precedence over the process-wide context
    /// whenever it yields a value; calls outside its scope fall back.
    pub fn set_context_provider(&self, provider: Arc<dyn ContextProvider>) {
        *self.context_provider.write() = Some(provider);
    }

    /// Install an explicit calling-site resolver.
    pub fn set_caller_locator(&self, locator: Arc<dyn CallerLocator>) {
        *self.caller_locator.write() = Some(locator);
    }

    /// The shared completion tracker (diagnostics and tests).
    pub fn tracker(&self) -> &CompletionTracker {
        &self.tracker
    }

    /// Wait until every currently tracked delivery has settled.
    ///
    /// Snapshot semantics; never fails, even when every delivery failed or
    /// timed out.
    pub async fn flush(&self) {
        self.tracker.flush().await;
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, template: &str, params: Vec<Value>) -> Result<()> {
        self.dispatch(level, template, params, None)
    }

    #[track_caller]
    pub fn log_with_exception(
        &self,
        level: LogLevel,
        error: &(dyn Error + 'static),
        template: &str,
        params: Vec<Value>,
    ) -> Result<()> {
        self.dispatch(level, template, params, Some(ExceptionDetail::from_error(error)))
    }

    #[track_caller]
    pub fn debug(&self, template: &str, params: Vec<Value>) -> Result<()> {
        self.dispatch(LogLevel::Debug, template, params, None)
    }

    #[track_caller]
    pub fn info(&self, template: &str, params: Vec<Value>) -> Result<()> {
        self.dispatch(LogLevel::Info, template, params, None)
    }

    #[track_caller]
    pub fn warn(&self, template: &str, params: Vec<Value>) -> Result<()> {
        self.dispatch(LogLevel::Warn, template, params, None)
    }

    #[track_caller]
    pub fn error(&self, template: &str, params: Vec<Value>) -> Result<()> {
        self.dispatch(LogLevel::Error, template, params, None)
    }

    #[track_caller]
    pub fn critical(&self, template: &str, params: Vec<Value>) -> Result<()> {
        self.dispatch(LogLevel::Critical, template, params, None)
    }

    #[track_caller]
    pub fn fatal(&self, template: &str, params: Vec<Value>) -> Result<()> {
        self.dispatch(LogLevel::Fatal, template, params, None)
    }

    #[track_caller]
    pub fn debug_with_exception(
        &self,
        error: &(dyn Error + 'static),
        template: &str,
        params: Vec<Value>,
    ) -> Result<()> {
        self.log_with_exception(LogLevel::Debug, error, template, params)
    }

    #[track_caller]
    pub fn info_with_exception(
        &self,
        error: &(dyn Error + 'static),
        template: &str,
        params: Vec<Value>,
    ) -> Result<()> {
        self.log_with_exception(LogLevel::Info, error, template, params)
    }

    #[track_caller]
    pub fn warn_with_exception(
        &self,
        error: &(dyn Error + 'static),
        template: &str,
        params: Vec<Value>,
    ) -> Result<()> {
        self.log_with_exception(LogLevel::Warn, error, template, params)
    }

    #[track_caller]
    pub fn error_with_exception(
        &self,
        error: &(dyn Error + 'static),
        template: &str,
        params: Vec<Value>,
    ) -> Result<()> {
        self.log_with_exception(LogLevel::Error, error, template, params)
    }

    #[track_caller]
    pub fn critical_with_exception(
        &self,
        error: &(dyn Error + 'static),
        template: &str,
        params: Vec<Value>,
    ) -> Result<()> {
        self.log_with_exception(LogLevel::Critical, error, template, params)
    }

    #[track_caller]
    pub fn fatal_with_exception(
        &self,
        error: &(dyn Error + 'static),
        template: &str,
        params: Vec<Value>,
    ) -> Result<()> {
        self.log_with_exception(LogLevel::Fatal, error, template, params)
    }

    /// Context for the current call: installed provider first, process-wide
    /// default otherwise.
    fn resolve_context(&self) -> ContextConfig {
        if let Some(provider) = self.context_provider.read().as_ref() {
            if let Some(config) = provider.current() {
                return config;
            }
        }
        self.context.read().clone()
    }

    #[track_caller]
    fn locate_caller(&self) -> Option<CallSite> {
        if let Some(locator) = self.caller_locator.read().as_ref() {
            return locator.locate();
        }
        Some(CallSite::capture())
    }

    #[track_caller]
    fn dispatch(
        &self,
        level: LogLevel,
        template: &str,
        params: Vec<Value>,
        exception: Option<ExceptionDetail>,
    ) -> Result<()> {
        let call_site = self.locate_caller();

        // Arity mismatch aborts here: no destination is invoked and no
        // handle is enqueued.
        let mut record = format_template(level, template, params)?;

        self.enrich(&mut record, exception, call_site);

        for destination in &self.destinations {
            if !destination.is_active() {
                continue;
            }
            let handle = destination.log(&record, level);
            self.tracker.enqueue(handle);
        }

        if self.tracker.pending_count() > 0 {
            self.tracker.cleanup();
        }

        Ok(())
    }

    /// Best-effort enrichment; missing optional data is never an error.
    fn enrich(
        &self,
        record: &mut FormattedRecord,
        exception: Option<ExceptionDetail>,
        call_site: Option<CallSite>,
    ) {
        let context = self.resolve_context();

        record.application = self.runtime.application.clone();
        record.version = self.runtime.version.clone();
        record.environment = self.runtime.environment.clone();
        record.context_id = context.context_id.clone();
        record.message = context.decorate(&record.message);
        record.call_site = call_site;
        record.exception = exception;
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use dispatch_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .runtime_info(RuntimeInfo::from_env())
///     .context(ContextConfig::new().with_prefix("[api]"))
///     .build();
/// logger.info("ready", vec![]).unwrap();
/// ```
pub struct LoggerBuilder {
    destinations: Vec<Arc<dyn Destination>>,
    runtime: RuntimeInfo,
    context: ContextConfig,
    context_provider: Option<Arc<dyn ContextProvider>>,
    caller_locator: Option<Arc<dyn CallerLocator>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            destinations: Vec::new(),
            runtime: RuntimeInfo::default(),
            context: ContextConfig::default(),
            context_provider: None,
            caller_locator: None,
        }
    }

    /// Register a destination. Dispatch order follows registration order.
    #[must_use = "builder methods return a new value"]
    pub fn destination<D: Destination + 'static>(mut self, destination: D) -> Self {
        self.destinations.push(Arc::new(destination));
        self
    }

    /// Register an already-shared destination.
    #[must_use = "builder methods return a new value"]
    pub fn destination_arc(mut self, destination: Arc<dyn Destination>) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Set the runtime identity stamped onto every record.
    #[must_use = "builder methods return a new value"]
    pub fn runtime_info(mut self, runtime: RuntimeInfo) -> Self {
        self.runtime = runtime;
        self
    }

    /// Set the initial process-wide context.
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Install a per-request context provider at construction time.
    #[must_use = "builder methods return a new value"]
    pub fn context_provider(mut self, provider: Arc<dyn ContextProvider>) -> Self {
        self.context_provider = Some(provider);
        self
    }

    /// Install an explicit calling-site resolver at construction time.
    #[must_use = "builder methods return a new value"]
    pub fn caller_locator(mut self, locator: Arc<dyn CallerLocator>) -> Self {
        self.caller_locator = Some(locator);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            destinations: self.destinations,
            tracker: Arc::new(CompletionTracker::new()),
            runtime: self.runtime,
            context: RwLock::new(self.context),
            context_provider: RwLock::new(self.context_provider),
            caller_locator: RwLock::new(self.caller_locator),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
