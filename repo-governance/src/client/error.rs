//! Gateway error types.

use crate::rate_limit::RateLimitInfo;
use thiserror::Error;

/// Errors raised by the HTTP fetch gateway.
///
/// Transport failures ([`Network`](Self::Network), [`Timeout`](Self::Timeout))
/// are kept apart from well-formed API rejections ([`Api`](Self::Api)) since
/// the advice given to the user differs.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("Network error while requesting {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: octocrab::Error,
    },

    /// The request did not complete in time.
    #[error("Request to {url} timed out after {timeout_secs} seconds")]
    Timeout { url: String, timeout_secs: u64 },

    /// GitHub answered with a non-2xx status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        rate_limit: Option<RateLimitInfo>,
    },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured token cannot be sent as a header value.
    #[error("Token contains characters that are not valid in an HTTP header")]
    InvalidToken,

    /// The underlying HTTP client could not be built.
    #[error("Failed to build GitHub client: {0}")]
    Build(#[source] octocrab::Error),
}

impl GatewayError {
    /// Returns the HTTP status for API errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for connectivity failures, timeouts included.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Returns true if the target does not exist or is not visible.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the token was rejected.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns true for a `403` with no quota left.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Api {
                status: 403 | 429,
                rate_limit: Some(info),
                ..
            } => info.is_exhausted(),
            _ => false,
        }
    }

    /// Returns a user-facing hint for resolving the failure, where one is known.
    #[must_use]
    pub fn remediation(&self) -> Option<String> {
        if self.is_network() {
            return Some(
                "Check your network connection and that the API URL is reachable.".to_string(),
            );
        }
        if self.is_rate_limited() {
            let reset = match self {
                Self::Api {
                    rate_limit: Some(info),
                    ..
                } => info
                    .reset_at()
                    .map(|at| at.to_rfc3339())
                    .unwrap_or_else(|| "an unknown time".to_string()),
                _ => "an unknown time".to_string(),
            };
            return Some(format!(
                "GitHub API rate limit exceeded; it resets at {reset}. Authenticate to raise the limit."
            ));
        }
        if self.is_unauthorized() {
            return Some("The token is invalid or expired; log in again.".to_string());
        }
        if self.is_not_found() {
            return Some(
                "The repository or account does not exist, or the token cannot access it."
                    .to_string(),
            );
        }
        None
    }
}
