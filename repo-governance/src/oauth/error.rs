//! OAuth error types.

use crate::client::GatewayError;
use thiserror::Error;

/// Errors raised by the OAuth login flow.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// No OAuth client id is configured.
    #[error("OAuth login is not configured: set GITHUB_OAUTH_CLIENT_ID")]
    MissingClientId,

    /// No token-exchange proxy is configured.
    #[error("OAuth token exchange is not configured: set GITHUB_OAUTH_PROXY_URL")]
    MissingProxyUrl,

    /// The callback state does not match the pending login.
    #[error("OAuth state mismatch; the callback may have been forged")]
    StateMismatch,

    /// The callback URL lacks `code` or `state`.
    #[error("OAuth callback is missing the {0} parameter")]
    MissingCallbackParameter(&'static str),

    /// The user or provider declined the authorization.
    #[error("Authorization was denied: {error}{}", .description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    AuthorizationDenied {
        error: String,
        description: Option<String>,
    },

    /// The proxy did not return an access token.
    #[error("Token exchange failed: {0}")]
    Exchange(String),

    /// The proxy request could not be sent.
    #[error("Token exchange request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured URL is malformed.
    #[error("Invalid OAuth URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An authenticated GitHub request failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl OAuthError {
    /// Returns true for missing configuration, as opposed to a failed flow.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingClientId | Self::MissingProxyUrl | Self::InvalidUrl(_)
        )
    }
}
