//! Ambient context merged into every log call
//!
//! A [`ContextConfig`] carries an opaque correlation id plus message
//! prefix/suffix text. The dispatcher keeps a process-wide value; an
//! installed [`ContextProvider`] takes precedence for the dynamic extent of
//! the logical request it serves.

use serde::{Deserialize, Serialize};

/// Correlation/prefix/suffix data applied to log calls in scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Opaque correlation identifier, attached to the record
    pub context_id: Option<String>,
    /// Text prepended to every rendered message
    pub prefix: Option<String>,
    /// Text appended to every rendered message
    pub suffix: Option<String>,
}

impl ContextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_context_id(mut self, id: impl Into<String>) -> Self {
        self.context_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.context_id.is_none() && self.prefix.is_none() && self.suffix.is_none()
    }

    /// Wrap a rendered message with the configured prefix and suffix.
    pub fn decorate(&self, message: &str) -> String {
        match (&self.prefix, &self.suffix) {
            (Some(prefix), Some(suffix)) => format!("{} {} {}", prefix, message, suffix),
            (Some(prefix), None) => format!("{} {}", prefix, message),
            (None, Some(suffix)) => format!("{} {}", message, suffix),
            (None, None) => message.to_string(),
        }
    }
}

/// Source of per-logical-request context.
///
/// When installed on the logger it overrides the process-wide default for
/// every call whose task tree carries a bound context; calls without one
/// fall back to the process-wide value.
pub trait ContextProvider: Send + Sync {
    fn current(&self) -> Option<ContextConfig>;
}

tokio::task_local! {
    static TASK_CONTEXT: ContextConfig;
}

/// [`ContextProvider`] backed by a tokio task-local slot.
///
/// Bind a context for a future with [`scoped_context`]; calls made inside
/// that future (and its children on the same task) resolve to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskLocalContextProvider;

impl ContextProvider for TaskLocalContextProvider {
    fn current(&self) -> Option<ContextConfig> {
        TASK_CONTEXT.try_with(|config| config.clone()).ok()
    }
}

/// Run a future with `config` bound as the task-local context.
pub async fn scoped_context<F>(config: ContextConfig, future: F) -> F::Output
where
    F: std::future::Future,
{
    TASK_CONTEXT.scope(config, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate_variants() {
        let both = ContextConfig::new().with_prefix(">>").with_suffix("<<");
        assert_eq!(both.decorate("msg"), ">> msg <<");

        let prefix_only = ContextConfig::new().with_prefix("[api]");
        assert_eq!(prefix_only.decorate("msg"), "[api] msg");

        let suffix_only = ContextConfig::new().with_suffix("(done)");
        assert_eq!(suffix_only.decorate("msg"), "msg (done)");

        assert_eq!(ContextConfig::new().decorate("msg"), "msg");
    }

    #[test]
    fn test_is_empty() {
        assert!(ContextConfig::new().is_empty());
        assert!(!ContextConfig::new().with_context_id("abc").is_empty());
    }

    #[tokio::test]
    async fn test_task_local_provider_scopes_context() {
        let provider = TaskLocalContextProvider;
        assert!(provider.current().is_none());

        let bound = ContextConfig::new().with_context_id("req-42");
        let seen = scoped_context(bound.clone(), async move {
            TaskLocalContextProvider.current()
        })
        .await;

        assert_eq!(seen, Some(bound));
        assert!(provider.current().is_none());
    }
}
