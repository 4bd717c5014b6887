//! Rubric checks other than governance files.
//!
//! Each check reads the tree and metadata and owns its own finding titles.

use super::classify::{Classification, AGENT_INSTRUCTION_FILES};
use super::repository::RepositoryMetadata;
use super::tree::{is_source_file, FileTree};
use crate::findings::{Category, Finding, FindingSet, Severity};

pub(crate) const MISSING_README: &str = "Missing README";
pub(crate) const MISSING_DESCRIPTION: &str = "Missing repository description";
pub(crate) const MISSING_TOPICS: &str = "Missing repository topics";
pub(crate) const MISSING_HOMEPAGE: &str = "Missing homepage URL";
pub(crate) const NO_CI_WORKFLOWS: &str = "No CI workflows";
pub(crate) const MISSING_ISSUE_TEMPLATES: &str = "Missing issue templates";
pub(crate) const MISSING_PR_TEMPLATE: &str = "Missing pull request template";
pub(crate) const MISSING_MANIFEST: &str = "Missing dependency manifest";
pub(crate) const MISSING_AGENT_INSTRUCTIONS: &str = "Missing agent instructions";

const README_NAMES: &[&str] = &["README.md", "README", "README.rst", "README.txt", "README.markdown"];

/// Directories GitHub searches for community files.
const COMMUNITY_DIRS: &[&str] = &["", ".github/", "docs/"];

const DEPENDENCY_MANIFESTS: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "requirements.txt",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "Gemfile",
    "composer.json",
];

const ABOUT_EFFORT: &str = "5–10 minutes";

/// Runs README, About-box, CI, community, dependency and agent checks.
pub(crate) fn run_checks(
    tree: &FileTree,
    metadata: &RepositoryMetadata,
    classification: Classification,
    findings: &mut FindingSet,
    limitations: &mut Vec<String>,
) {
    check_readme(tree, findings);
    check_about(metadata, findings);
    check_ci(tree, findings);
    check_community(tree, findings);
    check_dependencies(tree, classification, findings, limitations);
    check_agent_instructions(tree, findings);
}

fn check_readme(tree: &FileTree, findings: &mut FindingSet) {
    if in_community_dirs(tree, README_NAMES) {
        return;
    }

    findings.push(Finding {
        category: Category::Documentation,
        severity: Severity::Critical,
        title: MISSING_README.to_string(),
        description: "Visitors have no explanation of what the project does, how to install it or how to use it.".to_string(),
        recommendation: "Add a README.md covering purpose, installation, usage and where to get help.".to_string(),
        automatable: false,
        effort: "30–90 minutes".to_string(),
        requires_write_access: true,
    });
}

fn check_about(metadata: &RepositoryMetadata, findings: &mut FindingSet) {
    if is_blank(metadata.description.as_deref()) {
        findings.push(about_finding(
            Severity::Important,
            MISSING_DESCRIPTION,
            "The repository has no About description, so search results and listings show nothing about it.",
            "Add a one-sentence description in the repository's About settings.",
        ));
    }

    if metadata.topics.iter().all(|t| t.trim().is_empty()) {
        findings.push(about_finding(
            Severity::Recommended,
            MISSING_TOPICS,
            "Without topics the repository is harder to discover through GitHub topic search.",
            "Add topics describing the language, domain and purpose in the About settings.",
        ));
    }

    if is_blank(metadata.homepage.as_deref()) {
        findings.push(about_finding(
            Severity::Optional,
            MISSING_HOMEPAGE,
            "No website or documentation link is shown in the About box.",
            "Set the homepage URL to the project's documentation or website.",
        ));
    }
}

fn about_finding(severity: Severity, title: &str, description: &str, recommendation: &str) -> Finding {
    Finding {
        category: Category::Metadata,
        severity,
        title: title.to_string(),
        description: description.to_string(),
        recommendation: recommendation.to_string(),
        automatable: true,
        effort: ABOUT_EFFORT.to_string(),
        requires_write_access: true,
    }
}

fn check_ci(tree: &FileTree, findings: &mut FindingSet) {
    if !tree.workflow_files().is_empty() {
        return;
    }

    findings.push(Finding {
        category: Category::ContinuousIntegration,
        severity: Severity::Important,
        title: NO_CI_WORKFLOWS.to_string(),
        description: "No GitHub Actions workflows were found, so changes are not built or tested automatically.".to_string(),
        recommendation: "Add a workflow under .github/workflows/ that builds and tests every pull request.".to_string(),
        automatable: false,
        effort: "1–2 hours".to_string(),
        requires_write_access: true,
    });
}

fn check_community(tree: &FileTree, findings: &mut FindingSet) {
    let has_issue_templates = tree.has_prefix(".github/ISSUE_TEMPLATE/")
        || in_community_dirs(tree, &["ISSUE_TEMPLATE.md", "issue_template.md"]);
    if !has_issue_templates {
        findings.push(Finding {
            category: Category::Community,
            severity: Severity::Recommended,
            title: MISSING_ISSUE_TEMPLATES.to_string(),
            description: "Bug reports and feature requests arrive without structure, which slows triage.".to_string(),
            recommendation: "Add issue forms or templates under .github/ISSUE_TEMPLATE/.".to_string(),
            automatable: true,
            effort: "15–45 minutes".to_string(),
            requires_write_access: true,
        });
    }

    let has_pr_template = tree.has_prefix(".github/PULL_REQUEST_TEMPLATE/")
        || in_community_dirs(
            tree,
            &["PULL_REQUEST_TEMPLATE.md", "pull_request_template.md"],
        );
    if !has_pr_template {
        findings.push(Finding {
            category: Category::Community,
            severity: Severity::Recommended,
            title: MISSING_PR_TEMPLATE.to_string(),
            description: "Pull requests lack a checklist, so reviewers cannot rely on tests, docs and changelog being covered.".to_string(),
            recommendation: "Add .github/pull_request_template.md with a short review checklist.".to_string(),
            automatable: true,
            effort: "15–45 minutes".to_string(),
            requires_write_access: true,
        });
    }
}

fn check_dependencies(
    tree: &FileTree,
    classification: Classification,
    findings: &mut FindingSet,
    limitations: &mut Vec<String>,
) {
    let manifests = dependency_manifests(tree);

    if !manifests.is_empty() {
        limitations.push(format!(
            "Dependency vulnerability scanning is not performed; review {} with a dedicated scanner",
            manifests.join(", ")
        ));
        return;
    }

    let has_sources = tree.iter().any(is_source_file);
    let expects_manifest = !matches!(classification, Classification::Docs | Classification::Config);
    if has_sources && expects_manifest {
        findings.push(Finding {
            category: Category::Dependencies,
            severity: Severity::Recommended,
            title: MISSING_MANIFEST.to_string(),
            description: "Source code is present but no dependency manifest declares what it needs to build or run.".to_string(),
            recommendation: "Declare dependencies in the ecosystem's manifest (for example package.json, pyproject.toml or Cargo.toml).".to_string(),
            automatable: false,
            effort: "30–90 minutes".to_string(),
            requires_write_access: true,
        });
    }
}

/// Manifest paths at any depth, in tree order.
pub(crate) fn dependency_manifests(tree: &FileTree) -> Vec<&str> {
    tree.iter()
        .filter(|path| {
            let file = path.rsplit('/').next().unwrap_or_default();
            DEPENDENCY_MANIFESTS.contains(&file)
        })
        .collect()
}

fn check_agent_instructions(tree: &FileTree, findings: &mut FindingSet) {
    if AGENT_INSTRUCTION_FILES.iter().any(|f| tree.contains(f)) {
        return;
    }

    findings.push(Finding {
        category: Category::Community,
        severity: Severity::Optional,
        title: MISSING_AGENT_INSTRUCTIONS.to_string(),
        description: "Coding agents have no repository-specific instructions on conventions, build or test commands.".to_string(),
        recommendation: "Add an AGENTS.md describing how to build, test and contribute to the project.".to_string(),
        automatable: true,
        effort: "15–45 minutes".to_string(),
        requires_write_access: true,
    });
}

/// Returns true if any name (exact or lowercase) exists at the root, `.github/` or `docs/`.
fn in_community_dirs(tree: &FileTree, names: &[&str]) -> bool {
    COMMUNITY_DIRS.iter().any(|dir| {
        names.iter().any(|name| {
            tree.contains(&format!("{dir}{name}"))
                || tree.contains(&format!("{dir}{}", name.to_lowercase()))
        })
    })
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::classify::classify;

    fn metadata() -> RepositoryMetadata {
        RepositoryMetadata {
            default_branch: "main".to_string(),
            fork: false,
            parent: None,
            description: Some("A tool".to_string()),
            homepage: Some("https://example.com".to_string()),
            topics: vec!["rust".to_string()],
        }
    }

    fn run(paths: &[&str], metadata: &RepositoryMetadata) -> (Vec<Finding>, Vec<String>) {
        let tree = FileTree::from_paths(paths.iter().copied());
        let classification = classify(&tree);
        let mut findings = FindingSet::new();
        let mut limitations = Vec::new();
        run_checks(&tree, metadata, classification, &mut findings, &mut limitations);
        (findings.into_vec(), limitations)
    }

    fn titles(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.title.as_str()).collect()
    }

    #[test]
    fn complete_repository_has_no_findings() {
        let (findings, limitations) = run(
            &[
                "README.md",
                "Cargo.toml",
                "src/lib.rs",
                "AGENTS.md",
                ".github/workflows/ci.yml",
                ".github/ISSUE_TEMPLATE/bug.yml",
                ".github/pull_request_template.md",
            ],
            &metadata(),
        );
        assert!(findings.is_empty(), "{:?}", titles(&findings));
        assert_eq!(
            limitations,
            vec!["Dependency vulnerability scanning is not performed; review Cargo.toml with a dedicated scanner"]
        );
    }

    #[test]
    fn readme_variants_are_accepted() {
        for path in ["readme.md", "docs/README.rst", ".github/README.md", "README"] {
            let (findings, _) = run(&[path], &metadata());
            assert!(!titles(&findings).contains(&MISSING_README), "{path}");
        }
        let (findings, _) = run(&["src/readme_parser.rs"], &metadata());
        assert!(titles(&findings).contains(&MISSING_README));
    }

    #[test]
    fn blank_about_fields_are_reported() {
        let mut meta = metadata();
        meta.description = Some("   ".to_string());
        meta.homepage = None;
        meta.topics.clear();
        let (findings, _) = run(&["README.md"], &meta);
        let titles = titles(&findings);
        assert!(titles.contains(&MISSING_DESCRIPTION));
        assert!(titles.contains(&MISSING_TOPICS));
        assert!(titles.contains(&MISSING_HOMEPAGE));
    }

    #[test]
    fn workflows_satisfy_ci_check() {
        let (findings, _) = run(&[".github/workflows/release.yaml"], &metadata());
        assert!(!titles(&findings).contains(&NO_CI_WORKFLOWS));
        let (findings, _) = run(&[".gitlab-ci.yml"], &metadata());
        assert!(titles(&findings).contains(&NO_CI_WORKFLOWS));
    }

    #[test]
    fn manifest_expected_for_source_code() {
        let (findings, _) = run(&["main.go", "util.go", "server.go", "db.go", "api.go"], &metadata());
        assert!(titles(&findings).contains(&MISSING_MANIFEST));

        let (findings, _) = run(&["guide.md", "intro.md", "faq.md", "setup.sh"], &metadata());
        assert!(!titles(&findings).contains(&MISSING_MANIFEST));
    }

    #[test]
    fn finds_nested_manifests() {
        let tree = FileTree::from_paths(["web/package.json", "api/go.mod", "src/Cargo.toml.bak"]);
        assert_eq!(dependency_manifests(&tree), vec!["api/go.mod", "web/package.json"]);
    }
}
