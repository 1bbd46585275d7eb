//! Process runtime metadata and calling-site collaborators
//!
//! Enrichment inputs that are best-effort by design: application identity
//! resolved from environment variables with manifest fallbacks, and an
//! optional [`CallerLocator`] seam for hosts that can do better than the
//! default `#[track_caller]` capture.

use super::record::CallSite;

/// Application name override.
pub const APP_NAME_ENV: &str = "APP_NAME";

/// Application version override.
pub const APP_VERSION_ENV: &str = "APP_VERSION";

/// Deployment environment name (e.g. `production`, `staging`).
pub const APP_ENVIRONMENT_ENV: &str = "APP_ENVIRONMENT";

/// Environment name used when [`APP_ENVIRONMENT_ENV`] is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Process-wide identity stamped onto every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub application: Option<String>,
    pub version: Option<String>,
    pub environment: Option<String>,
}

impl RuntimeInfo {
    /// Resolve identity from the environment alone.
    ///
    /// Prefer the [`crate::runtime_info!`] macro, which also supplies the
    /// embedding crate's manifest name and version as fallbacks.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve identity with manifest fallbacks for name and version.
    ///
    /// Environment variables win over the manifest values; the environment
    /// name falls back to [`DEFAULT_ENVIRONMENT`].
    pub fn from_manifest(name: &str, version: &str) -> Self {
        let mut info = Self::from_lookup(|key| std::env::var(key).ok());
        if info.application.is_none() {
            info.application = Some(name.to_string());
        }
        if info.version.is_none() {
            info.version = Some(version.to_string());
        }
        info
    }

    /// Resolve identity through an injectable lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            application: lookup(APP_NAME_ENV),
            version: lookup(APP_VERSION_ENV),
            environment: Some(
                lookup(APP_ENVIRONMENT_ENV).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            ),
        }
    }
}

/// Optional collaborator that resolves the calling site of a log call.
///
/// Best-effort: `None` is a valid answer and never an error. When no
/// locator is installed the logger captures the public level function's
/// caller via `#[track_caller]`.
pub trait CallerLocator: Send + Sync {
    fn locate(&self) -> Option<CallSite>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_resolution_with_overrides() {
        let info = RuntimeInfo::from_lookup(|key| match key {
            APP_NAME_ENV => Some("billing-api".to_string()),
            APP_ENVIRONMENT_ENV => Some("production".to_string()),
            _ => None,
        });
        assert_eq!(info.application.as_deref(), Some("billing-api"));
        assert_eq!(info.version, None);
        assert_eq!(info.environment.as_deref(), Some("production"));
    }

    #[test]
    fn test_environment_defaults_to_development() {
        let info = RuntimeInfo::from_lookup(|_| None);
        assert_eq!(info.environment.as_deref(), Some(DEFAULT_ENVIRONMENT));
    }

    #[test]
    fn test_manifest_fallback() {
        // No env overrides in this process for these keys; manifest values
        // fill the gaps.
        let info = RuntimeInfo::from_manifest("demo-app", "1.2.3");
        assert!(info.application.is_some());
        assert!(info.version.is_some());
    }
}
