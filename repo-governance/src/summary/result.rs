//! Per-repository outcome types.

use crate::analyzer::{AnalysisError, AnalysisResult, RepositoryIdentity};
use serde::Serialize;

/// A repository whose analysis failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryFailure {
    /// Repository full name.
    pub repository: String,
    /// Primary cause.
    pub error: String,
    /// Hint for resolving the failure, where one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl RepositoryFailure {
    /// Builds a failure record from an analysis error.
    #[must_use]
    pub fn from_error(identity: &RepositoryIdentity, error: &AnalysisError) -> Self {
        Self {
            repository: identity.full_name(),
            error: error.to_string(),
            remediation: error.remediation(),
        }
    }
}

/// Result of analyzing a single repository within a batch.
#[derive(Debug)]
pub enum RepositoryOutcome {
    /// Analysis succeeded.
    Analyzed(Box<AnalysisResult>),

    /// Analysis failed; siblings are unaffected.
    Failed(RepositoryFailure),
}
