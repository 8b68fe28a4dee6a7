//! Client configuration: the base defaults and the caller's overrides.
//!
//! # Design
//! `ClientConfig::base()` is what every instance starts from. It picks the
//! base URL by build mode and honors two environment overrides. Callers pass
//! a `ClientOptions` (every field optional) that is merged on top, so the
//! merge rule is one small pure function.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::notify::{LogNotifier, Notifier};

/// Backend used by development builds.
pub const DEV_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

pub const BASE_URL_ENV: &str = "REQUEST_BASE_URL";
pub const TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    /// Production builds use relative paths; the host comes from the
    /// deployment.
    pub fn default_base_url(self) -> &'static str {
        match self {
            BuildMode::Development => DEV_BASE_URL,
            BuildMode::Production => "",
        }
    }
}

/// Effective configuration of one `Http` instance.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    /// Largest response body read into memory. `None` reads any size.
    pub max_body_bytes: Option<u64>,
    pub show_fail_toast: bool,
    pub notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("show_fail_toast", &self.show_fail_toast)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Base configuration for the current build mode and environment.
    pub fn base() -> Self {
        Self::base_from(BuildMode::current(), |key| std::env::var(key).ok())
    }

    /// Base configuration with an explicit mode and environment lookup.
    pub fn base_from(mode: BuildMode, env: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = env(BASE_URL_ENV).unwrap_or_else(|| mode.default_base_url().to_string());
        let timeout = match env(TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid {}", TIMEOUT_ENV);
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };
        Self {
            base_url,
            headers: Vec::new(),
            timeout,
            max_body_bytes: None,
            show_fail_toast: true,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Apply caller options over this configuration. Set fields win.
    pub fn merge(mut self, options: ClientOptions) -> Self {
        if let Some(base_url) = options.base_url {
            self.base_url = base_url;
        }
        self.headers.extend(options.headers);
        if let Some(timeout) = options.timeout {
            self.timeout = timeout;
        }
        if let Some(limit) = options.max_body_bytes {
            self.max_body_bytes = Some(limit);
        }
        if let Some(show) = options.show_fail_toast {
            self.show_fail_toast = show;
        }
        if let Some(notifier) = options.notifier {
            self.notifier = notifier;
        }
        self
    }
}

/// Caller-supplied configuration for an instance.
#[derive(Clone, Default)]
pub struct ClientOptions {
    pub base_url: Option<String>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub max_body_bytes: Option<u64>,
    pub show_fail_toast: Option<bool>,
    pub notifier: Option<Arc<dyn Notifier>>,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("show_fail_toast", &self.show_fail_toast)
            .field("custom_notifier", &self.notifier.is_some())
            .finish()
    }
}

impl ClientOptions {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    pub fn show_fail_toast(mut self, show: bool) -> Self {
        self.show_fail_toast = Some(show);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn development_targets_placeholder_host() {
        let config = ClientConfig::base_from(BuildMode::Development, no_env);
        assert_eq!(config.base_url, DEV_BASE_URL);
        assert!(config.show_fail_toast);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn production_uses_relative_paths() {
        let config = ClientConfig::base_from(BuildMode::Production, no_env);
        assert_eq!(config.base_url, "");
    }

    #[test]
    fn environment_overrides_build_mode() {
        let config = ClientConfig::base_from(BuildMode::Production, |key| match key {
            BASE_URL_ENV => Some("http://api.internal".to_string()),
            TIMEOUT_ENV => Some(" 5 ".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://api.internal");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_timeout_falls_back_to_default() {
        let config = ClientConfig::base_from(BuildMode::Development, |key| {
            (key == TIMEOUT_ENV).then(|| "soon".to_string())
        });
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = ClientConfig::base_from(BuildMode::Development, |key| {
            (key == TIMEOUT_ENV).then(|| "0".to_string())
        });
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn body_size_is_unlimited_unless_configured() {
        let base = ClientConfig::base_from(BuildMode::Development, no_env);
        assert_eq!(base.max_body_bytes, None);
        let limited = base.merge(ClientOptions::default().max_body_bytes(1024));
        assert_eq!(limited.max_body_bytes, Some(1024));
    }

    #[test]
    fn debug_output_skips_notifier() {
        let config = ClientConfig::base_from(BuildMode::Development, no_env);
        let rendered = format!("{config:?}");
        assert!(rendered.contains("base_url"));
        assert!(!rendered.contains("notifier"));
    }

    #[test]
    fn options_win_over_base() {
        let config = ClientConfig::base_from(BuildMode::Development, no_env).merge(
            ClientOptions::default()
                .base_url("http://localhost:3000")
                .header("x-app", "demo")
                .timeout(Duration::from_secs(2))
                .show_fail_toast(false),
        );
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.headers, vec![("x-app".to_string(), "demo".to_string())]);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(!config.show_fail_toast);
    }

    #[test]
    fn empty_options_keep_base() {
        let base = ClientConfig::base_from(BuildMode::Development, no_env);
        let merged = base.clone().merge(ClientOptions::default());
        assert_eq!(merged.base_url, base.base_url);
        assert_eq!(merged.show_fail_toast, base.show_fail_toast);
        assert_eq!(merged.timeout, base.timeout);
    }
}
