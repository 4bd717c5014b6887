//! Batch orchestration error types.

use crate::discovery::DiscoveryError;
use crate::summary::RepositoryFailure;
use thiserror::Error;

/// Failures that abort a whole batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The repository listing could not be fetched.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Every attempted repository analysis failed.
    #[error("All {} repository analyses for {target} failed; first error: {}", .failures.len(), first_error(.failures))]
    AllFailed {
        target: String,
        failures: Vec<RepositoryFailure>,
    },
}

impl BatchError {
    /// Returns a user-facing hint for resolving the failure, where one is known.
    #[must_use]
    pub fn remediation(&self) -> Option<String> {
        match self {
            Self::Discovery(e) => e.remediation(),
            Self::AllFailed { failures, .. } => failures
                .iter()
                .find_map(|failure| failure.remediation.clone()),
        }
    }
}

fn first_error(failures: &[RepositoryFailure]) -> &str {
    failures
        .first()
        .map_or("unknown", |failure| failure.error.as_str())
}
