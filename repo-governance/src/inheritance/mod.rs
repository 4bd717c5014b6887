//! Organization-level community health file inheritance.
//!
//! GitHub treats files in an organization's `.github` repository as present
//! for member repositories that lack their own copy. Probes here are
//! best-effort: any failure counts as "absent" and never aborts an analysis.
//! Results are memoized per owner so that scanning an organization costs one
//! probe per key, not one per repository.

mod cache;

pub use cache::{OrgInheritanceCache, ProbeKey, ProbeOutcome};

use crate::client::{encode_path, GatewayError, GitHubClient};
use serde_json::Value;
use tracing::{debug, warn};

/// Name of the repository holding organization-wide defaults.
pub const ORG_GITHUB_REPOSITORY: &str = ".github";

/// Resolves inherited governance files through the GitHub API.
#[derive(Debug)]
pub struct OrgInheritance {
    client: GitHubClient,
    cache: OrgInheritanceCache,
}

impl OrgInheritance {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new(client: GitHubClient) -> Self {
        Self {
            client,
            cache: OrgInheritanceCache::new(),
        }
    }

    /// Returns the memoized probe results.
    #[must_use]
    pub fn cache(&self) -> &OrgInheritanceCache {
        &self.cache
    }

    /// Checks whether `{owner}/.github` exists.
    pub async fn org_has_github_repo(&mut self, owner: &str) -> ProbeOutcome {
        let route = format!("/repos/{owner}/{ORG_GITHUB_REPOSITORY}");
        self.probe(owner, ProbeKey::GithubRepository, &route).await
    }

    /// Checks whether `filename` exists in `{owner}/.github`.
    pub async fn file_exists_in_org_github(&mut self, owner: &str, filename: &str) -> ProbeOutcome {
        let route = format!(
            "/repos/{owner}/{ORG_GITHUB_REPOSITORY}/contents/{}",
            encode_path(filename)
        );
        self.probe(owner, ProbeKey::File(filename.to_string()), &route)
            .await
    }

    async fn probe(&mut self, owner: &str, key: ProbeKey, route: &str) -> ProbeOutcome {
        if let Some(outcome) = self.cache.get(owner, &key) {
            debug!(owner, ?key, ?outcome, "Inheritance probe served from cache");
            return outcome;
        }

        let outcome = match self.client.fetch_json(route).await {
            Ok(Value::Null) => ProbeOutcome::NotFound,
            Ok(_) => ProbeOutcome::Found,
            Err(e) => classify_failure(owner, route, &e),
        };

        self.cache.record(owner, key, outcome)
    }
}

fn classify_failure(owner: &str, route: &str, error: &GatewayError) -> ProbeOutcome {
    if error.is_not_found() {
        debug!(owner, route, "Organization probe target not found");
        return ProbeOutcome::NotFound;
    }

    warn!(
        owner,
        route,
        error = %error,
        "Organization inheritance probe failed, treating as absent"
    );
    ProbeOutcome::Unavailable
}
