//! Findings produced by repository analysis and their display ordering.

mod priority;

pub use priority::{sort_findings, top_findings};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// How urgently a finding should be addressed.
///
/// Variants are declared from most to least urgent, so the derived ordering
/// is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Important,
    Recommended,
    Optional,
}

impl Severity {
    /// Returns the lowercase name used in reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::Recommended => "recommended",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rubric area a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Governance,
    Documentation,
    Metadata,
    #[serde(rename = "ci")]
    ContinuousIntegration,
    Community,
    Dependencies,
}

/// One rubric violation with its remediation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    pub severity: Severity,
    /// Unique within one repository's findings.
    pub title: String,
    pub description: String,
    pub recommendation: String,
    /// Whether the fix can be applied by tooling without human judgement.
    pub automatable: bool,
    /// Coarse time estimate, e.g. "15–45 minutes".
    pub effort: String,
    pub requires_write_access: bool,
}

/// Append-only collection of findings keyed by title.
///
/// A title is recorded at most once; later pushes with the same title are
/// dropped.
#[derive(Debug, Default)]
pub struct FindingSet {
    findings: Vec<Finding>,
    titles: HashSet<String>,
}

impl FindingSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding. Returns false if its title was already recorded.
    pub fn push(&mut self, finding: Finding) -> bool {
        if !self.titles.insert(finding.title.clone()) {
            debug!(title = %finding.title, "Duplicate finding title ignored");
            return false;
        }
        self.findings.push(finding);
        true
    }

    /// Returns the number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Returns true if no findings were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Consumes the set, returning findings in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Finding> {
        self.findings
    }
}

/// Counts findings with the given severity.
#[must_use]
pub fn count_severity(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}

#[cfg(test)]
pub(crate) fn sample_finding(title: &str, severity: Severity) -> Finding {
    Finding {
        category: Category::Governance,
        severity,
        title: title.to_string(),
        description: String::new(),
        recommendation: String::new(),
        automatable: false,
        effort: "15–45 minutes".to_string(),
        requires_write_access: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_most_urgent_first() {
        let mut severities = vec![
            Severity::Optional,
            Severity::Critical,
            Severity::Recommended,
            Severity::Important,
        ];
        severities.sort();
        assert_eq!(
            severities,
            vec![
                Severity::Critical,
                Severity::Important,
                Severity::Recommended,
                Severity::Optional
            ]
        );
    }

    #[test]
    fn finding_set_rejects_duplicate_titles() {
        let mut set = FindingSet::new();
        assert!(set.push(sample_finding("Missing LICENSE", Severity::Critical)));
        assert!(!set.push(sample_finding("Missing LICENSE", Severity::Optional)));

        let findings = set.into_vec();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
    }

    #[test]
    fn serializes_category_and_severity() {
        let mut finding = sample_finding("No CI workflows", Severity::Important);
        finding.category = Category::ContinuousIntegration;
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["category"], "ci");
        assert_eq!(json["severity"], "important");
    }
}
