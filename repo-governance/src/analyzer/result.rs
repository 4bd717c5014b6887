//! Analysis result types.

use super::classify::Classification;
use super::repository::{RepositoryIdentity, RepositoryMetadata};
use super::tree::FileTree;
use crate::config::PriorityConfig;
use crate::findings::{count_severity, sort_findings, Finding, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Coarse maturity score derived from findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturityLevel {
    Low,
    Medium,
    High,
}

impl MaturityLevel {
    /// Any critical finding gives `low`; otherwise more than two important
    /// findings give `medium`; otherwise `high`.
    #[must_use]
    pub fn from_findings(findings: &[Finding]) -> Self {
        if count_severity(findings, Severity::Critical) > 0 {
            Self::Low
        } else if count_severity(findings, Severity::Important) > 2 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a fork's divergence from upstream is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForkSyncStatus {
    /// The repository is not a fork.
    NotFork,
    /// Ahead/behind counts against upstream are not computed.
    Unknown,
}

/// Fork relationship of the analyzed repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkStatus {
    pub is_fork: bool,
    pub upstream_full_name: Option<String>,
    pub sync_status: ForkSyncStatus,
}

impl ForkStatus {
    /// Derives fork status from fetched metadata.
    #[must_use]
    pub fn from_metadata(metadata: &RepositoryMetadata) -> Self {
        Self {
            is_fork: metadata.fork,
            upstream_full_name: metadata.parent.as_ref().map(|p| p.full_name.clone()),
            sync_status: if metadata.fork {
                ForkSyncStatus::Unknown
            } else {
                ForkSyncStatus::NotFork
            },
        }
    }
}

/// Finding counts per severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub important: usize,
    pub recommended: usize,
    pub optional: usize,
}

impl SeverityCounts {
    fn from_findings(findings: &[Finding]) -> Self {
        Self {
            critical: count_severity(findings, Severity::Critical),
            important: count_severity(findings, Severity::Important),
            recommended: count_severity(findings, Severity::Recommended),
            optional: count_severity(findings, Severity::Optional),
        }
    }
}

/// Size and shape measurements of the analyzed tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetrics {
    pub total_files: usize,
    pub source_files: usize,
    pub documentation_files: usize,
    pub workflow_files: usize,
    pub findings: SeverityCounts,
}

impl RepositoryMetrics {
    pub(crate) fn measure(tree: &FileTree, findings: &[Finding]) -> Self {
        Self {
            total_files: tree.len(),
            source_files: tree.source_file_count(),
            documentation_files: tree.documentation_file_count(),
            workflow_files: tree.workflow_files().len(),
            findings: SeverityCounts::from_findings(findings),
        }
    }
}

/// Outcome of analyzing one repository.
///
/// Maturity is not stored; [`AnalysisResult::maturity_level`] recomputes it
/// from the findings.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub repository: RepositoryIdentity,
    pub analyzed_at: DateTime<Utc>,
    pub classification: Classification,
    pub fork: ForkStatus,
    pub findings: Vec<Finding>,
    pub metrics: RepositoryMetrics,
    /// Notes about data that could not be verified or was approximated.
    pub limitations: Vec<String>,
}

impl AnalysisResult {
    /// Maturity level derived from the current findings.
    #[must_use]
    pub fn maturity_level(&self) -> MaturityLevel {
        MaturityLevel::from_findings(&self.findings)
    }

    /// Returns the finding with `title`, if any.
    #[must_use]
    pub fn finding(&self, title: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.title == title)
    }

    /// Reorders findings for display.
    pub fn prioritize(&mut self, config: Option<&PriorityConfig>) {
        sort_findings(&mut self.findings, config);
    }
}

/// Serialized shape of an [`AnalysisResult`].
#[derive(Serialize)]
struct AnalysisRecord<'a> {
    repository: String,
    analyzed_at: &'a DateTime<Utc>,
    classification: Classification,
    is_fork: bool,
    fork_upstream: Option<&'a str>,
    fork_status: ForkSyncStatus,
    maturity_level: MaturityLevel,
    findings: &'a [Finding],
    metrics: &'a RepositoryMetrics,
    limitations: &'a [String],
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AnalysisRecord {
            repository: self.repository.full_name(),
            analyzed_at: &self.analyzed_at,
            classification: self.classification,
            is_fork: self.fork.is_fork,
            fork_upstream: self.fork.upstream_full_name.as_deref(),
            fork_status: self.fork.sync_status,
            maturity_level: self.maturity_level(),
            findings: &self.findings,
            metrics: &self.metrics,
            limitations: &self.limitations,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ParentRepository;
    use crate::findings::sample_finding;

    fn findings(critical: usize, important: usize) -> Vec<Finding> {
        let mut findings = Vec::new();
        for i in 0..critical {
            findings.push(sample_finding(&format!("critical {i}"), Severity::Critical));
        }
        for i in 0..important {
            findings.push(sample_finding(&format!("important {i}"), Severity::Important));
        }
        findings.push(sample_finding("optional", Severity::Optional));
        findings
    }

    #[test]
    fn maturity_thresholds() {
        assert_eq!(MaturityLevel::from_findings(&findings(1, 0)), MaturityLevel::Low);
        assert_eq!(MaturityLevel::from_findings(&findings(0, 3)), MaturityLevel::Medium);
        assert_eq!(MaturityLevel::from_findings(&findings(0, 2)), MaturityLevel::High);
        assert_eq!(MaturityLevel::from_findings(&findings(0, 0)), MaturityLevel::High);
        assert_eq!(MaturityLevel::from_findings(&[]), MaturityLevel::High);
    }

    #[test]
    fn fork_status_from_metadata() {
        let mut metadata = RepositoryMetadata {
            default_branch: "main".to_string(),
            fork: false,
            parent: None,
            description: None,
            homepage: None,
            topics: Vec::new(),
        };
        let status = ForkStatus::from_metadata(&metadata);
        assert!(!status.is_fork);
        assert_eq!(status.sync_status, ForkSyncStatus::NotFork);

        metadata.fork = true;
        metadata.parent = Some(ParentRepository {
            full_name: "upstream/project".to_string(),
        });
        let status = ForkStatus::from_metadata(&metadata);
        assert!(status.is_fork);
        assert_eq!(status.upstream_full_name.as_deref(), Some("upstream/project"));
        assert_eq!(status.sync_status, ForkSyncStatus::Unknown);
    }

    #[test]
    fn serializes_report_shape() {
        let result = AnalysisResult {
            repository: RepositoryIdentity::new("acme", "widget"),
            analyzed_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            classification: Classification::Library,
            fork: ForkStatus {
                is_fork: false,
                upstream_full_name: None,
                sync_status: ForkSyncStatus::NotFork,
            },
            findings: findings(1, 0),
            metrics: RepositoryMetrics::default(),
            limitations: vec!["note".to_string()],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["repository"], "acme/widget");
        assert_eq!(json["classification"], "library");
        assert_eq!(json["is_fork"], false);
        assert!(json["fork_upstream"].is_null());
        assert_eq!(json["fork_status"], "not_fork");
        assert_eq!(json["maturity_level"], "low");
        assert_eq!(json["findings"].as_array().unwrap().len(), 2);
        assert_eq!(json["metrics"]["total_files"], 0);
        assert_eq!(json["limitations"][0], "note");
        assert_eq!(json["analyzed_at"], "2023-11-14T22:13:20Z");
    }
}
