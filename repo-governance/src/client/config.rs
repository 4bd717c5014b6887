//! Gateway configuration.

use std::time::Duration;

/// Public GitHub REST API host.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for building a [`GitHubClient`](super::GitHubClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API.
    api_base_url: String,
    /// Statically configured token, if any.
    token: Option<String>,
    /// Upper bound on a single request, including reading the body.
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the public API.
    ///
    /// Blank tokens are treated as absent.
    pub fn new(token: Option<String>) -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets a custom API base URL (GitHub Enterprise or a test server).
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns the configured token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_ignored() {
        assert_eq!(ClientConfig::new(Some("  ".to_string())).token(), None);
        assert_eq!(
            ClientConfig::new(Some("ghp_abc".to_string())).token(),
            Some("ghp_abc")
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::default().with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.api_base_url(), "http://127.0.0.1:9999");
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
