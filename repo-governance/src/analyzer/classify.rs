//! Heuristic repository classification.

use super::tree::FileTree;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse repository kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Library,
    Webapp,
    Cli,
    Docs,
    Config,
    Mixed,
}

impl Classification {
    /// Returns the lowercase name used in reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Library => "library",
            Self::Webapp => "webapp",
            Self::Cli => "cli",
            Self::Docs => "docs",
            Self::Config => "config",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directories whose presence marks a web application.
const WEB_ASSET_PREFIXES: &[&str] = &["public/", "static/", "templates/"];

/// Directories conventionally holding command entry points.
const CLI_PREFIXES: &[&str] = &["cmd/", "cli/"];

const PYTHON_MANIFESTS: &[&str] = &["pyproject.toml", "setup.py"];

/// Python, Node and Rust package manifests.
const PACKAGE_MANIFESTS: &[&str] = &["package.json", "pyproject.toml", "setup.py", "Cargo.toml"];

/// Files that configure coding agents.
pub(crate) const AGENT_INSTRUCTION_FILES: &[&str] =
    &["AGENTS.md", "CLAUDE.md", ".github/copilot-instructions.md"];

/// Share of documentation files (in percent) at which a repository is `docs`.
const DOCS_THRESHOLD_PERCENT: usize = 70;

/// Below this many source files a repository with CI or agent files is `config`.
const CONFIG_SOURCE_LIMIT: usize = 5;

/// Classifies a repository from its file tree.
///
/// Rules are evaluated in order and the first match wins:
/// 1. `package.json` or `index.html` plus a `public/`, `static/` or `templates/` directory: `webapp`
/// 2. a `cmd/` or `cli/` directory, or a Python manifest with a `__main__.py`: `cli`
/// 3. any Python, Node or Rust package manifest: `library`
/// 4. at least 70% Markdown/reStructuredText files: `docs`
/// 5. agent instructions or CI workflows with fewer than 5 source files: `config`
/// 6. otherwise `mixed`
#[must_use]
pub fn classify(tree: &FileTree) -> Classification {
    let has_any = |names: &[&str]| names.iter().any(|name| tree.contains(name));
    let has_prefix = |prefixes: &[&str]| prefixes.iter().any(|prefix| tree.has_prefix(prefix));

    if has_any(&["package.json", "index.html"]) && has_prefix(WEB_ASSET_PREFIXES) {
        return Classification::Webapp;
    }

    let has_python_entry_point =
        has_any(PYTHON_MANIFESTS) && tree.iter().any(|path| path.ends_with("__main__.py"));
    if has_prefix(CLI_PREFIXES) || has_python_entry_point {
        return Classification::Cli;
    }

    if has_any(PACKAGE_MANIFESTS) {
        return Classification::Library;
    }

    let total = tree.len();
    if total > 0 && tree.documentation_file_count() * 100 >= total * DOCS_THRESHOLD_PERCENT {
        return Classification::Docs;
    }

    let has_automation = has_any(AGENT_INSTRUCTION_FILES) || tree.has_prefix(".github/workflows/");
    if has_automation && tree.source_file_count() < CONFIG_SOURCE_LIMIT {
        return Classification::Config;
    }

    Classification::Mixed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_paths(paths: &[&str]) -> Classification {
        classify(&FileTree::from_paths(paths.iter().copied()))
    }

    #[test]
    fn webapp_needs_manifest_and_asset_dir() {
        assert_eq!(
            classify_paths(&["package.json", "public/index.html", "src/app.js"]),
            Classification::Webapp
        );
        assert_eq!(
            classify_paths(&["index.html", "static/site.css"]),
            Classification::Webapp
        );
        assert_eq!(
            classify_paths(&["package.json", "src/index.js"]),
            Classification::Library
        );
    }

    #[test]
    fn cli_detection() {
        assert_eq!(
            classify_paths(&["go.mod", "cmd/tool/main.go"]),
            Classification::Cli
        );
        assert_eq!(
            classify_paths(&["pyproject.toml", "tool/__main__.py"]),
            Classification::Cli
        );
        assert_eq!(
            classify_paths(&["tool/__main__.py", "tool/core.py"]),
            Classification::Mixed
        );
    }

    #[test]
    fn rule_order_prefers_webapp_over_cli() {
        assert_eq!(
            classify_paths(&["package.json", "cli/index.js", "public/logo.svg"]),
            Classification::Webapp
        );
    }

    #[test]
    fn docs_threshold_is_seventy_percent() {
        let mut paths = vec!["a.md", "b.md", "c.md", "d.md", "e.md", "f.md", "g.rst"];
        paths.extend(["x.txt", "y.txt", "z.txt"]);
        assert_eq!(classify_paths(&paths), Classification::Docs);

        paths.push("w.txt");
        assert_eq!(classify_paths(&paths), Classification::Mixed);
    }

    #[test]
    fn config_repository() {
        assert_eq!(
            classify_paths(&[".github/workflows/ci.yml", "AGENTS.md", "renovate.json"]),
            Classification::Config
        );
        assert_eq!(
            classify_paths(&[
                ".github/workflows/ci.yml",
                "a.py",
                "b.py",
                "c.py",
                "d.py",
                "e.py"
            ]),
            Classification::Mixed
        );
    }

    #[test]
    fn empty_tree_is_mixed() {
        assert_eq!(classify_paths(&[]), Classification::Mixed);
    }

    #[test]
    fn classification_is_pure() {
        let tree = FileTree::from_paths(["Cargo.toml", "src/lib.rs"]);
        assert_eq!(classify(&tree), classify(&tree.clone()));
        assert_eq!(classify(&tree), Classification::Library);
    }
}
