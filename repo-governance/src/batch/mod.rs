//! Batch orchestration over every repository of a user or organization.
//!
//! Repositories are analyzed strictly in sequence with one shared
//! [`RepositoryAnalyzer`], so organization probes are issued once per batch.
//! A failed repository is recorded and skipped; only a batch in which every
//! analysis fails is an error.

mod error;

pub use error::BatchError;

use crate::account::resolve_account_type;
use crate::analyzer::{RepositoryAnalyzer, RepositoryIdentity};
use crate::client::GitHubClient;
use crate::discovery::{list_repositories, without_forks};
use crate::summary::{BatchReport, RepositoryFailure, RepositoryOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};

/// Callback invoked before each repository as `(index, total, identity)`,
/// with a zero-based index.
pub type BatchProgress<'a> = dyn FnMut(usize, usize, &RepositoryIdentity) + Send + 'a;

/// Runs the analyzer over an account's repositories.
#[derive(Debug)]
pub struct BatchOrchestrator {
    analyzer: RepositoryAnalyzer,
    cancellation: Option<Arc<AtomicBool>>,
}

impl BatchOrchestrator {
    /// Creates an orchestrator with a fresh analyzer and inheritance cache.
    #[must_use]
    pub fn new(client: GitHubClient) -> Self {
        Self {
            analyzer: RepositoryAnalyzer::new(client),
            cancellation: None,
        }
    }

    /// Sets a flag checked between repository analyses.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    /// Returns the analyzer shared across the batch.
    #[must_use]
    pub fn analyzer(&self) -> &RepositoryAnalyzer {
        &self.analyzer
    }

    /// Lists and analyzes every repository of `login`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError`] if listing fails or every analysis fails.
    pub async fn analyze_all(
        &mut self,
        login: &str,
        skip_forks: bool,
    ) -> Result<BatchReport, BatchError> {
        self.analyze_all_with_progress(login, skip_forks, &mut |_, _, _| {})
            .await
    }

    /// Like [`analyze_all`](Self::analyze_all), reporting each repository to
    /// `on_progress` before it is analyzed.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError`] if listing fails or every analysis fails.
    pub async fn analyze_all_with_progress(
        &mut self,
        login: &str,
        skip_forks: bool,
        on_progress: &mut BatchProgress<'_>,
    ) -> Result<BatchReport, BatchError> {
        let span = info_span!("batch", login = %login, skip_forks);

        async {
            let resolution = resolve_account_type(self.analyzer.client(), login).await;
            let mut report = BatchReport::new(login, Some(resolution.account_type));
            report.warnings.extend(resolution.warning);

            let mut listed =
                list_repositories(self.analyzer.client(), login, resolution.account_type).await?;
            let listed_count = listed.len();

            if skip_forks {
                listed = without_forks(listed);
                if listed.is_empty() && listed_count > 0 {
                    let notice = format!(
                        "All {listed_count} repositories of {login} are forks; nothing left to analyze after skipping forks"
                    );
                    info!("{notice}");
                    report.notices.push(notice);
                }
            }
            if listed_count == 0 {
                report
                    .notices
                    .push(format!("No repositories found for {login}"));
            }

            let identities: Vec<_> = listed.iter().map(|repo| repo.identity()).collect();
            self.analyze_repositories(&identities, report, on_progress)
                .await
        }
        .instrument(span)
        .await
    }

    /// Analyzes `repositories` in order, appending outcomes to `report`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::AllFailed`] if at least one repository was
    /// attempted and none succeeded.
    pub async fn analyze_repositories(
        &mut self,
        repositories: &[RepositoryIdentity],
        mut report: BatchReport,
        on_progress: &mut BatchProgress<'_>,
    ) -> Result<BatchReport, BatchError> {
        let total = repositories.len();
        info!(total, "Analyzing repositories");

        for (index, identity) in repositories.iter().enumerate() {
            if self.is_cancelled() {
                warn!(analyzed = index, total, "Batch cancelled");
                report.notices.push(format!(
                    "Batch cancelled after {index} of {total} repositories"
                ));
                break;
            }

            on_progress(index, total, identity);
            let outcome = match self.analyzer.analyze(identity).await {
                Ok(result) => RepositoryOutcome::Analyzed(Box::new(result)),
                Err(e) => {
                    error!(repo = %identity, error = %e, "Repository analysis failed");
                    RepositoryOutcome::Failed(RepositoryFailure::from_error(identity, &e))
                }
            };
            report.record(outcome);
        }

        info!(
            succeeded = report.stats.succeeded,
            failed = report.stats.failed,
            "Batch complete"
        );

        if report.stats.succeeded == 0 && report.stats.failed > 0 {
            return Err(BatchError::AllFailed {
                target: report.target,
                failures: report.failures,
            });
        }
        Ok(report)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;

    fn orchestrator() -> BatchOrchestrator {
        let client = GitHubClient::new(&ClientConfig::new(None)).unwrap();
        BatchOrchestrator::new(client)
    }

    #[tokio::test]
    async fn empty_list_is_not_an_error() {
        let report = orchestrator()
            .analyze_repositories(&[], BatchReport::new("acme", None), &mut |_, _, _| {})
            .await
            .unwrap();
        assert_eq!(report.stats.total, 0);
    }

    #[tokio::test]
    async fn cancellation_is_checked_before_each_repository() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut calls = 0;
        let report = orchestrator()
            .with_cancellation(flag)
            .analyze_repositories(
                &[RepositoryIdentity::new("acme", "widgets")],
                BatchReport::new("acme", None),
                &mut |_, _, _| calls += 1,
            )
            .await
            .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(report.stats.total, 0);
        assert_eq!(report.notices.len(), 1);
    }
}
