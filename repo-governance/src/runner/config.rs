//! Runner configuration.

use super::target::Target;
use crate::client::DEFAULT_TIMEOUT_SECS;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repository or account to analyze.
    target: Target,
    /// GitHub token used for API calls.
    token: Option<String>,
    /// Whether forks are excluded in batch mode.
    skip_forks: bool,
    /// Custom API base URL, for GitHub Enterprise.
    api_base_url: Option<String>,
    /// Per-request timeout.
    timeout: Duration,
    /// Path to the finding priority config.
    priority_config_path: Option<PathBuf>,
    /// Flag checked between repository analyses.
    cancellation: Option<Arc<AtomicBool>>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(target: Target, token: Option<String>) -> Self {
        Self {
            target,
            token,
            skip_forks: false,
            api_base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            priority_config_path: None,
            cancellation: None,
        }
    }

    /// Excludes forks from batch runs.
    pub fn with_skip_forks(mut self, skip_forks: bool) -> Self {
        self.skip_forks = skip_forks;
        self
    }

    /// Sets a custom API base URL.
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(api_base_url.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the priority config file.
    pub fn with_priority_config_path(mut self, path: PathBuf) -> Self {
        self.priority_config_path = Some(path);
        self
    }

    /// Sets the cancellation flag.
    pub fn with_cancellation(mut self, cancellation: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    /// Returns the analysis target.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns whether forks are skipped.
    pub fn skip_forks(&self) -> bool {
        self.skip_forks
    }

    /// Returns the custom API base URL.
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the priority config file path.
    pub fn priority_config_path(&self) -> Option<&Path> {
        self.priority_config_path.as_deref()
    }

    /// Returns the cancellation flag.
    pub fn cancellation(&self) -> Option<&Arc<AtomicBool>> {
        self.cancellation.as_ref()
    }
}
