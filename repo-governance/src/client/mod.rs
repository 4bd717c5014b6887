//! HTTP fetch gateway for the GitHub REST API.
//!
//! All GitHub reads go through [`GitHubClient::fetch`]. The gateway attaches
//! the v3 `Accept` header and, when a token is configured, an
//! `Authorization: token <t>` header. Non-2xx responses become
//! [`GatewayError::Api`]; failures to get any response become
//! [`GatewayError::Network`] or [`GatewayError::Timeout`]. Nothing here retries.

mod config;
mod error;

pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use error::GatewayError;

use crate::rate_limit::RateLimitInfo;
use http::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Characters escaped inside one URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Authenticated (or anonymous) GitHub REST client.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    headers: HeaderMap,
    timeout: Duration,
    has_token: bool,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("timeout", &self.timeout)
            .field("has_token", &self.has_token)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Builds a client from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Build`] if the base URL is invalid and
    /// [`GatewayError::InvalidToken`] if the token cannot be sent as a header.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        install_crypto_provider();

        let octocrab = Octocrab::builder()
            .base_uri(config.api_base_url())
            .map_err(GatewayError::Build)?
            .add_retry_config(RetryConfig::None)
            .build()
            .map_err(GatewayError::Build)?;

        Ok(Self {
            octocrab,
            headers: build_headers(config.token())?,
            timeout: config.timeout(),
            has_token: config.token().is_some(),
        })
    }

    /// Returns a copy of this client that authenticates with `token` instead.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidToken`] if the token cannot be sent as a header.
    pub fn with_token(&self, token: Option<&str>) -> Result<Self, GatewayError> {
        let token = token.filter(|t| !t.trim().is_empty());
        Ok(Self {
            octocrab: self.octocrab.clone(),
            headers: build_headers(token)?,
            timeout: self.timeout,
            has_token: token.is_some(),
        })
    }

    /// Returns true if requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.has_token
    }

    /// Fetches `route` and returns the decoded JSON document.
    ///
    /// # Errors
    ///
    /// See [`GitHubClient::fetch`].
    pub async fn fetch_json(&self, route: &str) -> Result<Value, GatewayError> {
        self.fetch(route).await
    }

    /// Fetches `route` (a path relative to the API base, query included) and
    /// deserializes the body.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Network`] / [`GatewayError::Timeout`] when no response arrives
    /// - [`GatewayError::Api`] on any non-2xx status
    /// - [`GatewayError::Decode`] if the body does not match `T`
    pub async fn fetch<T: DeserializeOwned>(&self, route: &str) -> Result<T, GatewayError> {
        let body = self.get_body(route).await?;
        serde_json::from_str(&body).map_err(|source| GatewayError::Decode {
            url: route.to_string(),
            source,
        })
    }

    async fn get_body(&self, route: &str) -> Result<String, GatewayError> {
        debug!(route, "GitHub API request");

        let network = |source| GatewayError::Network {
            url: route.to_string(),
            source,
        };

        let request = async {
            let response = self
                .octocrab
                ._get_with_headers(route, Some(self.headers.clone()))
                .await
                .map_err(network)?;
            let status = response.status();
            let rate_limit = RateLimitInfo::from_headers(response.headers());
            let body = self
                .octocrab
                .body_to_string(response)
                .await
                .map_err(network)?;
            Ok::<_, GatewayError>((status, rate_limit, body))
        };

        let (status, rate_limit, body) = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| GatewayError::Timeout {
                url: route.to_string(),
                timeout_secs: self.timeout.as_secs(),
            })??;

        if !status.is_success() {
            debug!(route, status = status.as_u16(), "GitHub API rejected request");
            return Err(api_error(status.as_u16(), &body, rate_limit));
        }

        Ok(body)
    }
}

/// Percent-encodes a value for use in a route, segment by segment.
///
/// Slashes are kept as separators so that `feature/x` branches and nested
/// paths still address the same resource.
pub(crate) fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Builds the headers attached to every request.
fn build_headers(token: Option<&str>) -> Result<HeaderMap, GatewayError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_MEDIA_TYPE));

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("token {}", token.trim()))
            .map_err(|_| GatewayError::InvalidToken)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Converts a non-2xx response into an [`GatewayError::Api`].
///
/// The message comes from the body's `message` field when the body is JSON.
fn api_error(status: u16, body: &str, rate_limit: Option<RateLimitInfo>) -> GatewayError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("GitHub API error: {status}"));

    GatewayError::Api {
        status,
        message,
        rate_limit,
    }
}

/// Installs the process-wide rustls crypto provider.
///
/// Both the GitHub client and the OAuth proxy client use rustls; installing
/// more than once is harmless.
pub(crate) fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
