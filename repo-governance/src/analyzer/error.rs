//! Analysis error types.

use crate::client::GatewayError;
use thiserror::Error;

/// Unrecoverable failures while analyzing one repository.
///
/// Only the mandatory fetches can fail an analysis; organization probes
/// degrade to "absent" instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Repository metadata could not be fetched.
    #[error("Failed to fetch metadata for {repository}: {source}")]
    Metadata {
        repository: String,
        #[source]
        source: GatewayError,
    },

    /// The file tree of the default branch could not be fetched.
    #[error("Failed to fetch file tree for {repository} ({branch}): {source}")]
    Tree {
        repository: String,
        branch: String,
        #[source]
        source: GatewayError,
    },
}

impl AnalysisError {
    /// Returns the gateway failure behind this error.
    #[must_use]
    pub fn gateway_error(&self) -> &GatewayError {
        match self {
            Self::Metadata { source, .. } | Self::Tree { source, .. } => source,
        }
    }

    /// Returns a user-facing hint for resolving the failure, where one is known.
    #[must_use]
    pub fn remediation(&self) -> Option<String> {
        self.gateway_error().remediation()
    }
}
