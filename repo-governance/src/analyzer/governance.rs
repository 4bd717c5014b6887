//! Governance file rubric.

use super::tree::FileTree;
use crate::findings::{Category, Finding, FindingSet, Severity};
use crate::inheritance::OrgInheritance;
use tracing::debug;

const DEFAULT_EFFORT: &str = "15–45 minutes";
const LICENSE_EFFORT: &str = "1–3 hours";

/// A governance document the rubric expects at the repository root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GovernanceFile {
    pub filename: &'static str,
    pub severity: Severity,
    /// What the document is for, used in the recommendation.
    pub purpose: &'static str,
    /// Risk of not having the document.
    pub risk: &'static str,
    pub template_url: Option<&'static str>,
}

/// The fixed governance table.
pub const GOVERNANCE_FILES: &[GovernanceFile] = &[
    GovernanceFile {
        filename: "LICENSE",
        severity: Severity::Critical,
        purpose: "legal terms for use and redistribution",
        risk: "Without a license, default copyright applies and nobody can legally use, modify or share this code.",
        template_url: None,
    },
    GovernanceFile {
        filename: "CONTRIBUTING.md",
        severity: Severity::Important,
        purpose: "contribution guidelines",
        risk: "Contributors have no guidance on how to propose changes, which leads to inconsistent or rejected contributions.",
        template_url: None,
    },
    GovernanceFile {
        filename: "CODE_OF_CONDUCT.md",
        severity: Severity::Important,
        purpose: "community behaviour standards",
        risk: "There is no agreed standard of behaviour or enforcement path for the community.",
        template_url: None,
    },
    GovernanceFile {
        filename: "SECURITY.md",
        severity: Severity::Important,
        purpose: "vulnerability reporting policy",
        risk: "Security researchers have no private channel for reporting vulnerabilities, which raises the risk of public disclosure.",
        template_url: None,
    },
    GovernanceFile {
        filename: "CHANGELOG.md",
        severity: Severity::Recommended,
        purpose: "release history",
        risk: "Users cannot track what changed between releases.",
        template_url: None,
    },
    GovernanceFile {
        filename: "ACCESSIBILITY.md",
        severity: Severity::Recommended,
        purpose: "accessibility commitments",
        risk: "There is no stated accessibility commitment or route for reporting barriers.",
        template_url: Some("https://github.com/mgifford/ACCESSIBILITY.md"),
    },
    GovernanceFile {
        filename: "SUSTAINABILITY.md",
        severity: Severity::Optional,
        purpose: "sustainability commitments",
        risk: "The project's environmental and long-term maintenance commitments are undocumented.",
        template_url: Some("https://github.com/mgifford/sustainability.md"),
    },
];

impl GovernanceFile {
    /// Title of the finding raised when this file is missing.
    #[must_use]
    pub fn missing_title(&self) -> String {
        format!("Missing {}", self.filename)
    }

    /// Builds the finding raised when this file is missing everywhere.
    #[must_use]
    pub fn missing_finding(&self) -> Finding {
        let mut recommendation = format!("Add a {} describing {}.", self.filename, self.purpose);
        if let Some(url) = self.template_url {
            recommendation.push_str(&format!(" Template: {url}"));
        }

        let effort = if self.filename == "LICENSE" {
            LICENSE_EFFORT
        } else {
            DEFAULT_EFFORT
        };

        Finding {
            category: Category::Governance,
            severity: self.severity,
            title: self.missing_title(),
            description: self.risk.to_string(),
            recommendation,
            automatable: true,
            effort: effort.to_string(),
            requires_write_access: true,
        }
    }
}

/// Text recorded when a file is satisfied by the organization's `.github` repository.
pub(crate) fn inherited_limitation(filename: &str, owner: &str) -> String {
    format!("{filename} inherited from organization-level {owner}/.github repository")
}

/// Checks every governance file, consulting organization inheritance for
/// files missing from the repository.
///
/// Org probes are only issued when `org_has_github` is true.
pub(crate) async fn check_governance(
    tree: &FileTree,
    owner: &str,
    org_has_github: bool,
    inheritance: &mut OrgInheritance,
    findings: &mut FindingSet,
    limitations: &mut Vec<String>,
) {
    for file in GOVERNANCE_FILES {
        if let Some(path) = tree.find_variant(file.filename) {
            debug!(file = file.filename, path = %path, "Governance file present");
            continue;
        }

        if org_has_github
            && inheritance
                .file_exists_in_org_github(owner, file.filename)
                .await
                .exists()
        {
            debug!(file = file.filename, owner, "Governance file inherited");
            limitations.push(inherited_limitation(file.filename, owner));
            continue;
        }

        findings.push(file.missing_finding());
    }
}
