//! OAuth login session for obtaining a GitHub access token.
//!
//! The flow is `LoggedOut → login → PendingCallback → callback → LoggedIn`.
//! A callback whose state does not match the pending login is rejected
//! before any token exchange. The code is exchanged through a proxy since
//! GitHub's token endpoint cannot be called directly from a browser.

mod config;
mod error;

pub use config::{
    OAuthConfig, AUTHORIZE_URL, CLIENT_ID_ENV, OAUTH_SCOPE, PROXY_URL_ENV, REDIRECT_URI_ENV,
};
pub use error::OAuthError;

use crate::client::{install_crypto_provider, GitHubClient, DEFAULT_TIMEOUT_SECS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Number of random bytes in a CSRF state token.
const STATE_BYTES: usize = 32;

/// Position of a session in the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    PendingCallback,
    LoggedIn,
}

/// Identity returned by `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Serialize)]
struct ExchangeRequest<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'a str>,
}

#[derive(Deserialize)]
struct ExchangeResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Token lifecycle for one interactive session.
///
/// The token lives only as long as the session; nothing is persisted.
pub struct OAuthSession {
    config: OAuthConfig,
    http: reqwest::Client,
    pending_state: Option<String>,
    token: Option<String>,
}

impl std::fmt::Debug for OAuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSession")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl OAuthSession {
    /// Creates a logged-out session.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Http`] if the exchange client cannot be built.
    pub fn new(config: OAuthConfig) -> Result<Self, OAuthError> {
        install_crypto_provider();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            config,
            http,
            pending_state: None,
            token: None,
        })
    }

    /// Returns where this session is in the login flow.
    #[must_use]
    pub fn state(&self) -> AuthState {
        if self.token.is_some() {
            AuthState::LoggedIn
        } else if self.pending_state.is_some() {
            AuthState::PendingCallback
        } else {
            AuthState::LoggedOut
        }
    }

    /// Starts a login and returns the authorization URL to open.
    ///
    /// A fresh state token is generated on every call; only the latest one
    /// is accepted by [`handle_callback`](Self::handle_callback).
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingClientId`] if no client id is configured.
    pub fn login(&mut self) -> Result<Url, OAuthError> {
        let client_id = self.config.client_id().ok_or(OAuthError::MissingClientId)?;
        let state = generate_state();

        let mut url = Url::parse(AUTHORIZE_URL)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", client_id);
            if let Some(redirect_uri) = self.config.redirect_uri() {
                query.append_pair("redirect_uri", redirect_uri);
            }
            query.append_pair("scope", OAUTH_SCOPE);
            query.append_pair("state", &state);
        }

        self.pending_state = Some(state);
        debug!("OAuth login started");
        Ok(url)
    }

    /// Returns true if `url` carries an authorization response.
    #[must_use]
    pub fn is_callback(url: &Url) -> bool {
        let has = |name: &str| url.query_pairs().any(|(key, _)| key == name);
        (has("code") && has("state")) || has("error")
    }

    /// Completes a login from the callback URL.
    ///
    /// The pending state is cleared whatever the outcome. On success the
    /// token is stored and the callback URL is returned without its `code`
    /// and `state` parameters.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::StateMismatch`] without contacting the proxy if
    /// the state differs from the pending login, a configuration error if no
    /// proxy is set, or an exchange error if no token was issued.
    pub async fn handle_callback(&mut self, callback: &Url) -> Result<Url, OAuthError> {
        let expected = self.pending_state.take();
        let param = |name: &str| {
            callback
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        if let Some(error) = param("error") {
            return Err(OAuthError::AuthorizationDenied {
                error,
                description: param("error_description"),
            });
        }

        let code = param("code").ok_or(OAuthError::MissingCallbackParameter("code"))?;
        let state = param("state").ok_or(OAuthError::MissingCallbackParameter("state"))?;

        match expected {
            Some(expected) if constant_time_eq(expected.as_bytes(), state.as_bytes()) => {}
            _ => {
                warn!("OAuth callback state mismatch, rejecting");
                return Err(OAuthError::StateMismatch);
            }
        }

        let proxy_url = self.config.proxy_url().ok_or(OAuthError::MissingProxyUrl)?;
        let token = self.exchange_code(proxy_url, &code).await?;
        self.token = Some(token);
        info!("OAuth login complete");

        Ok(strip_callback_params(callback))
    }

    async fn exchange_code(&self, proxy_url: &str, code: &str) -> Result<String, OAuthError> {
        let proxy_url = Url::parse(proxy_url)?;
        let response = self
            .http
            .post(proxy_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&ExchangeRequest {
                code,
                redirect_uri: self.config.redirect_uri(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<ExchangeResponse> = serde_json::from_str(&body).ok();

        if let Some(ExchangeResponse {
            error: Some(error),
            error_description,
            ..
        }) = &parsed
        {
            let message = match error_description {
                Some(description) => format!("{error}: {description}"),
                None => error.clone(),
            };
            return Err(OAuthError::Exchange(message));
        }

        if !status.is_success() {
            return Err(OAuthError::Exchange(format!(
                "proxy responded with {status}"
            )));
        }

        parsed
            .and_then(|response| response.access_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| OAuthError::Exchange("proxy response had no access_token".to_string()))
    }

    /// Returns true iff a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the session token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the credential to use for requests: the session token when
    /// logged in, otherwise `fallback`.
    #[must_use]
    pub fn credential<'a>(&'a self, fallback: Option<&'a str>) -> Option<&'a str> {
        self.token.as_deref().or(fallback)
    }

    /// Looks up the authenticated user.
    ///
    /// Returns `Ok(None)` when logged out, and clears the token and returns
    /// `Ok(None)` if GitHub rejects it with a 401.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Gateway`] for any other request failure.
    pub async fn user_info(&mut self, client: &GitHubClient) -> Result<Option<UserInfo>, OAuthError> {
        let Some(token) = self.token.as_deref() else {
            return Ok(None);
        };

        let client = client.with_token(Some(token))?;
        match client.fetch::<UserInfo>("/user").await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthorized() => {
                warn!("Stored token was rejected, logging out");
                self.token = None;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Clears the token and any pending login.
    pub fn logout(&mut self) {
        self.token = None;
        self.pending_state = None;
        debug!("OAuth session cleared");
    }
}

/// Returns a hex-encoded random state token.
fn generate_state() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    rand::rng().fill(&mut bytes);
    bytes.iter().fold(String::with_capacity(STATE_BYTES * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Removes `code` and `state` from a callback URL, keeping other parameters.
fn strip_callback_params(callback: &Url) -> Url {
    let kept: Vec<(String, String)> = callback
        .query_pairs()
        .filter(|(key, _)| key != "code" && key != "state")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = callback.clone();
    url.set_query(None);
    if !kept.is_empty() {
        url.query_pairs_mut().extend_pairs(kept);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> OAuthSession {
        OAuthSession::new(
            OAuthConfig::new("Iv1.abc").with_redirect_uri("http://localhost:8080/callback"),
        )
        .unwrap()
    }

    fn query(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    #[test]
    fn login_requires_client_id() {
        let mut session = OAuthSession::new(OAuthConfig::default()).unwrap();
        assert!(matches!(session.login(), Err(OAuthError::MissingClientId)));
        assert_eq!(session.state(), AuthState::LoggedOut);
    }

    #[test]
    fn login_builds_authorize_url() {
        let mut session = session();
        let url = session.login().unwrap();

        assert!(url.as_str().starts_with(AUTHORIZE_URL));
        assert_eq!(query(&url, "client_id").as_deref(), Some("Iv1.abc"));
        assert_eq!(query(&url, "scope").as_deref(), Some("public_repo"));
        assert_eq!(
            query(&url, "redirect_uri").as_deref(),
            Some("http://localhost:8080/callback")
        );
        let state = query(&url, "state").unwrap();
        assert_eq!(state.len(), STATE_BYTES * 2);
        assert!(state.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(session.state(), AuthState::PendingCallback);
    }

    #[test]
    fn each_login_uses_new_state() {
        let mut session = session();
        let first = query(&session.login().unwrap(), "state");
        let second = query(&session.login().unwrap(), "state");
        assert_ne!(first, second);
    }

    #[test]
    fn detects_callback_urls() {
        let callback = Url::parse("http://localhost:8080/callback?code=abc&state=def").unwrap();
        let plain = Url::parse("http://localhost:8080/callback?code=abc").unwrap();
        assert!(OAuthSession::is_callback(&callback));
        assert!(!OAuthSession::is_callback(&plain));
    }

    #[tokio::test]
    async fn callback_without_pending_login_is_mismatch() {
        let mut session = session();
        let callback = Url::parse("http://localhost:8080/callback?code=abc&state=def").unwrap();
        let result = session.handle_callback(&callback).await;

        assert!(matches!(result, Err(OAuthError::StateMismatch)));
        assert_eq!(session.state(), AuthState::LoggedOut);
    }

    #[tokio::test]
    async fn matching_state_without_proxy_is_configuration_error() {
        let mut session = session();
        let state = query(&session.login().unwrap(), "state").unwrap();
        let callback =
            Url::parse(&format!("http://localhost:8080/callback?code=abc&state={state}")).unwrap();

        let error = session.handle_callback(&callback).await.unwrap_err();
        assert!(error.is_configuration());
        assert_eq!(session.state(), AuthState::LoggedOut);
    }

    #[tokio::test]
    async fn denied_callback_clears_pending_state() {
        let mut session = session();
        session.login().unwrap();
        let callback =
            Url::parse("http://localhost:8080/callback?error=access_denied&state=x").unwrap();

        let error = session.handle_callback(&callback).await.unwrap_err();
        assert!(matches!(error, OAuthError::AuthorizationDenied { .. }));
        assert_eq!(session.state(), AuthState::LoggedOut);
    }

    #[test]
    fn credential_prefers_session_token() {
        let mut session = session();
        assert_eq!(session.credential(Some("static")), Some("static"));
        session.token = Some("oauth".to_string());
        assert_eq!(session.credential(Some("static")), Some("oauth"));
        session.logout();
        assert_eq!(session.credential(None), None);
    }

    #[test]
    fn strips_only_code_and_state() {
        let callback =
            Url::parse("http://localhost:8080/app?tab=1&code=abc&state=def").unwrap();
        assert_eq!(
            strip_callback_params(&callback).as_str(),
            "http://localhost:8080/app?tab=1"
        );

        let bare = Url::parse("http://localhost:8080/callback?code=abc&state=def").unwrap();
        assert_eq!(
            strip_callback_params(&bare).as_str(),
            "http://localhost:8080/callback"
        );
    }

    #[test]
    fn compares_states_exactly() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
