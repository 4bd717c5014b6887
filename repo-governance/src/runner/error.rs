//! Runner error types.

use super::target::Target;

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Priority config loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub client initialization errors.
    #[error(transparent)]
    Gateway(#[from] crate::client::GatewayError),

    /// Single-repository analysis failure.
    #[error(transparent)]
    Analysis(#[from] crate::analyzer::AnalysisError),

    /// Batch listing failure or every analysis failed.
    #[error(transparent)]
    Batch(#[from] crate::batch::BatchError),

    /// OAuth login failure.
    #[error(transparent)]
    OAuth(#[from] crate::oauth::OAuthError),

    /// The target is neither `owner/name` nor a login.
    #[error("Invalid target '{0}': expected a login or owner/name")]
    InvalidTarget(String),

    /// The run was cancelled before any repository was analyzed.
    #[error("Run for {0} was cancelled")]
    Cancelled(Target),
}

impl RunnerError {
    /// Returns a user-facing hint for resolving the failure, where one is known.
    #[must_use]
    pub fn remediation(&self) -> Option<String> {
        match self {
            Self::Gateway(e) => e.remediation(),
            Self::Analysis(e) => e.remediation(),
            Self::Batch(e) => e.remediation(),
            Self::OAuth(e) if e.is_configuration() => Some(
                "Set GITHUB_OAUTH_CLIENT_ID and GITHUB_OAUTH_PROXY_URL, or pass --token instead."
                    .to_string(),
            ),
            _ => None,
        }
    }
}
