//! Batch report types.

use super::result::{RepositoryFailure, RepositoryOutcome};
use crate::account::AccountType;
use crate::analyzer::AnalysisResult;
use crate::config::PriorityConfig;
use serde::Serialize;

/// Success and failure counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// Number of repositories analyzed successfully.
    pub succeeded: usize,

    /// Number of repositories whose analysis failed.
    pub failed: usize,

    /// Number of repositories attempted.
    pub total: usize,
}

impl BatchStats {
    /// Updates the counts with a repository outcome.
    pub fn record(&mut self, outcome: &RepositoryOutcome) {
        match outcome {
            RepositoryOutcome::Analyzed(_) => self.succeeded += 1,
            RepositoryOutcome::Failed(_) => self.failed += 1,
        }
        self.total += 1;
    }

    /// Returns true if any analysis failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns true if every attempted analysis succeeded.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failed == 0
    }
}

/// Everything produced by one run, single repository or batch.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// The user, organization or `owner/name` that was analyzed.
    pub target: String,

    /// Resolved account type; absent in single-repository mode.
    pub account_type: Option<AccountType>,

    /// Successful analyses in listing order.
    pub results: Vec<AnalysisResult>,

    pub stats: BatchStats,

    pub failures: Vec<RepositoryFailure>,

    /// Non-fatal degradations, such as an account-type fallback.
    pub warnings: Vec<String>,

    /// Informational messages, such as an empty list after fork filtering.
    pub notices: Vec<String>,
}

impl BatchReport {
    /// Creates an empty report for `target`.
    #[must_use]
    pub fn new(target: impl Into<String>, account_type: Option<AccountType>) -> Self {
        Self {
            target: target.into(),
            account_type,
            ..Default::default()
        }
    }

    /// Records a repository outcome, keeping input order.
    pub fn record(&mut self, outcome: RepositoryOutcome) {
        self.stats.record(&outcome);
        match outcome {
            RepositoryOutcome::Analyzed(result) => self.results.push(*result),
            RepositoryOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    /// Orders the findings of every result for display.
    pub fn prioritize(&mut self, config: Option<&PriorityConfig>) {
        for result in &mut self.results {
            result.prioritize(config);
        }
    }

    /// Returns true if any analysis failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.stats.has_failures()
    }

    /// Returns true if every attempted analysis succeeded.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.stats.all_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(name: &str) -> RepositoryOutcome {
        RepositoryOutcome::Failed(RepositoryFailure {
            repository: format!("acme/{name}"),
            error: "Not Found".to_string(),
            remediation: None,
        })
    }

    #[test]
    fn can_record_failures() {
        let mut report = BatchReport::new("acme", Some(AccountType::Organization));
        report.record(failure("a"));
        report.record(failure("b"));

        assert_eq!(
            report.stats,
            BatchStats {
                succeeded: 0,
                failed: 2,
                total: 2
            }
        );
        assert_eq!(report.failures.len(), 2);
        assert!(report.has_failures());
        assert!(!report.all_success());
    }

    #[test]
    fn empty_report_is_successful() {
        let report = BatchReport::new("acme/widgets", None);
        assert!(report.all_success());
        assert_eq!(report.stats.total, 0);
    }

    #[test]
    fn serializes_stats_and_failures() {
        let mut report = BatchReport::new("acme", Some(AccountType::User));
        report.record(failure("a"));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["account_type"], "User");
        assert_eq!(json["stats"]["failed"], 1);
        assert_eq!(json["failures"][0]["repository"], "acme/a");
        assert!(json["failures"][0].get("remediation").is_none());
    }
}
