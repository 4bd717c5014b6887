//! OAuth configuration.

use std::env;

/// Environment variable holding the OAuth app client id.
pub const CLIENT_ID_ENV: &str = "GITHUB_OAUTH_CLIENT_ID";
/// Environment variable holding the registered redirect URI.
pub const REDIRECT_URI_ENV: &str = "GITHUB_OAUTH_REDIRECT_URI";
/// Environment variable holding the token-exchange proxy URL.
pub const PROXY_URL_ENV: &str = "GITHUB_OAUTH_PROXY_URL";

/// GitHub's authorization endpoint.
pub const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

/// Scope requested at login.
pub const OAUTH_SCOPE: &str = "public_repo";

/// OAuth app settings. Every field is optional until the flow needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthConfig {
    client_id: Option<String>,
    redirect_uri: Option<String>,
    proxy_url: Option<String>,
}

impl OAuthConfig {
    /// Creates a configuration for the given client id.
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: non_blank(Some(client_id.into())),
            ..Default::default()
        }
    }

    /// Reads the configuration from `GITHUB_OAUTH_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            client_id: non_blank(env::var(CLIENT_ID_ENV).ok()),
            redirect_uri: non_blank(env::var(REDIRECT_URI_ENV).ok()),
            proxy_url: non_blank(env::var(PROXY_URL_ENV).ok()),
        }
    }

    /// Sets the redirect URI sent with the authorization request.
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = non_blank(Some(redirect_uri.into()));
        self
    }

    /// Sets the proxy endpoint used for the code exchange.
    #[must_use]
    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = non_blank(Some(proxy_url.into()));
        self
    }

    /// Overrides fields with any values present in `other`.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.client_id = other.client_id.or(self.client_id);
        self.redirect_uri = other.redirect_uri.or(self.redirect_uri);
        self.proxy_url = other.proxy_url.or(self.proxy_url);
        self
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }

    /// Returns true if a login can be started.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
