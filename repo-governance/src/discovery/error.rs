//! Repository discovery error types.

use crate::client::GatewayError;
use thiserror::Error;

/// Errors that can occur while listing an account's repositories.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A listing page could not be fetched.
    #[error("Failed to list repositories for {login} (page {page}): {source}")]
    Listing {
        login: String,
        page: u32,
        #[source]
        source: GatewayError,
    },
}

impl DiscoveryError {
    /// Returns a user-facing hint for resolving the failure, where one is known.
    #[must_use]
    pub fn remediation(&self) -> Option<String> {
        match self {
            Self::Listing { source, .. } => source.remediation(),
        }
    }
}
