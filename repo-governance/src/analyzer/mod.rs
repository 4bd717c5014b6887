//! Repository analysis engine.
//!
//! [`RepositoryAnalyzer::analyze`] fetches metadata and the recursive file
//! tree of one repository, classifies it, runs every rubric check, merges
//! organization-inherited governance files and derives a maturity level.

mod checks;
mod classify;
mod error;
mod governance;
mod repository;
mod result;
mod tree;

pub use classify::{classify, Classification};
pub use error::AnalysisError;
pub use governance::{GovernanceFile, GOVERNANCE_FILES};
pub use repository::{ParentRepository, RepositoryIdentity, RepositoryMetadata};
pub use result::{
    AnalysisResult, ForkStatus, ForkSyncStatus, MaturityLevel, RepositoryMetrics, SeverityCounts,
};
pub use tree::FileTree;

use crate::client::{encode_path, GitHubClient};
use crate::findings::FindingSet;
use crate::inheritance::{OrgInheritance, OrgInheritanceCache, ProbeOutcome};
use chrono::Utc;
use tracing::{debug, info, info_span, Instrument};
use tree::TreeResponse;

/// Analyzes repositories, sharing one organization-inheritance cache across
/// every analysis it performs.
///
/// Create one analyzer per batch run so the cache never outlives the run.
#[derive(Debug)]
pub struct RepositoryAnalyzer {
    client: GitHubClient,
    inheritance: OrgInheritance,
}

impl RepositoryAnalyzer {
    /// Creates an analyzer with a fresh inheritance cache.
    #[must_use]
    pub fn new(client: GitHubClient) -> Self {
        Self {
            inheritance: OrgInheritance::new(client.clone()),
            client,
        }
    }

    /// Returns the gateway used for requests.
    #[must_use]
    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Returns the organization probe results memoized so far.
    #[must_use]
    pub fn inheritance_cache(&self) -> &OrgInheritanceCache {
        self.inheritance.cache()
    }

    /// Analyzes a single repository.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the metadata or file tree fetch fails.
    pub async fn analyze(
        &mut self,
        identity: &RepositoryIdentity,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_progress(identity, &mut |_| {}).await
    }

    /// Analyzes a single repository, reporting each stage to `on_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the metadata or file tree fetch fails.
    pub async fn analyze_with_progress(
        &mut self,
        identity: &RepositoryIdentity,
        on_progress: &mut (dyn FnMut(&str) + Send),
    ) -> Result<AnalysisResult, AnalysisError> {
        let span = info_span!("analyze", repo = %identity);
        self.run_analysis(identity, on_progress)
            .instrument(span)
            .await
    }

    async fn run_analysis(
        &mut self,
        identity: &RepositoryIdentity,
        on_progress: &mut (dyn FnMut(&str) + Send),
    ) -> Result<AnalysisResult, AnalysisError> {
        let owner = identity.owner.as_str();
        let full_name = identity.full_name();

        on_progress("Fetching repository metadata");
        let metadata: RepositoryMetadata = self
            .client
            .fetch(&format!("/repos/{full_name}"))
            .await
            .map_err(|source| AnalysisError::Metadata {
                repository: full_name.clone(),
                source,
            })?;

        let fork = ForkStatus::from_metadata(&metadata);
        let mut limitations = Vec::new();
        if let Some(upstream) = &fork.upstream_full_name {
            limitations.push(format!(
                "Fork sync status against {upstream} is not computed"
            ));
        }

        on_progress("Checking organization .github repository");
        let org_probe = self.inheritance.org_has_github_repo(owner).await;
        if org_probe == ProbeOutcome::Unavailable {
            limitations.push(format!(
                "Organization-level {owner}/.github repository could not be checked; inherited files were treated as absent"
            ));
        }

        on_progress("Fetching file tree");
        let branch = metadata.default_branch.as_str();
        let tree: TreeResponse = self
            .client
            .fetch(&format!(
                "/repos/{full_name}/git/trees/{}?recursive=1",
                encode_path(branch)
            ))
            .await
            .map_err(|source| AnalysisError::Tree {
                repository: full_name.clone(),
                branch: branch.to_string(),
                source,
            })?;
        let tree = FileTree::from_response(tree);
        if tree.is_truncated() {
            limitations.push(
                "File tree was truncated by GitHub; some files may not have been checked"
                    .to_string(),
            );
        }
        debug!(files = tree.len(), "Fetched file tree");

        let classification = classify(&tree);

        on_progress("Running checks");
        let mut findings = FindingSet::new();
        governance::check_governance(
            &tree,
            owner,
            org_probe.exists(),
            &mut self.inheritance,
            &mut findings,
            &mut limitations,
        )
        .await;
        checks::run_checks(
            &tree,
            &metadata,
            classification,
            &mut findings,
            &mut limitations,
        );

        let findings = findings.into_vec();
        let metrics = RepositoryMetrics::measure(&tree, &findings);
        let result = AnalysisResult {
            repository: identity.clone(),
            analyzed_at: Utc::now(),
            classification,
            fork,
            findings,
            metrics,
            limitations,
        };

        info!(
            classification = %result.classification,
            findings = result.findings.len(),
            maturity = ?result.maturity_level(),
            "Analysis complete"
        );
        Ok(result)
    }
}
