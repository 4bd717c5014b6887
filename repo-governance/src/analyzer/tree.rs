//! In-memory file tree of a repository's default branch.

use serde::Deserialize;
use std::collections::BTreeSet;

/// Extensions counted as source code.
const SOURCE_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "mjs", "cjs", "ts", "tsx", "jsx", "go", "java", "kt", "kts", "scala", "c",
    "h", "cc", "cpp", "hpp", "cs", "rb", "php", "swift", "m", "sh", "lua", "dart", "ex", "exs",
    "hs", "r", "jl", "vue", "svelte",
];

/// Extensions counted as documentation.
const DOCUMENTATION_EXTENSIONS: &[&str] = &["md", "markdown", "rst"];

/// Response of `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1`.
#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Every blob path on the default branch, relative to the repository root.
///
/// Paths are case-sensitive. Built once per analysis and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    paths: BTreeSet<String>,
    truncated: bool,
}

impl FileTree {
    /// Builds a tree from blob paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            truncated: false,
        }
    }

    pub(crate) fn from_response(response: TreeResponse) -> Self {
        Self {
            paths: response
                .tree
                .into_iter()
                .filter(|entry| entry.kind == "blob")
                .map(|entry| entry.path)
                .collect(),
            truncated: response.truncated,
        }
    }

    /// Returns true if GitHub truncated the listing.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if the tree has no files.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates over all paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Exact membership test.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Returns true if any path starts with `prefix` (e.g. `"public/"`).
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.paths
            .range(prefix.to_string()..)
            .next()
            .is_some_and(|path| path.starts_with(prefix))
    }

    /// Returns true if `filename` exists under any accepted variant.
    ///
    /// Variants are the exact name, its lowercase form, and both of those
    /// under `.github/`. Markdown names also accept the same four forms with
    /// a `.rst` extension.
    pub fn contains_variant(&self, filename: &str) -> bool {
        self.find_variant(filename).is_some()
    }

    /// Returns the first variant of `filename` present in the tree.
    pub fn find_variant(&self, filename: &str) -> Option<String> {
        name_variants(filename)
            .into_iter()
            .find(|candidate| self.contains(candidate))
    }

    /// Number of files with a source-code extension.
    pub fn source_file_count(&self) -> usize {
        self.iter().filter(|p| is_source_file(p)).count()
    }

    /// Number of Markdown or reStructuredText files.
    pub fn documentation_file_count(&self) -> usize {
        self.iter().filter(|p| is_documentation_file(p)).count()
    }

    /// Paths of CI workflow definitions.
    pub fn workflow_files(&self) -> Vec<&str> {
        self.iter().filter(|p| is_workflow_file(p)).collect()
    }
}

/// Candidate paths for a governance filename, in lookup order.
pub(crate) fn name_variants(filename: &str) -> Vec<String> {
    let mut bases = vec![filename.to_string()];
    if let Some(stem) = filename.strip_suffix(".md") {
        bases.push(format!("{stem}.rst"));
    }

    let mut variants = Vec::with_capacity(bases.len() * 4);
    for base in &bases {
        let lower = base.to_lowercase();
        for name in [base.clone(), lower] {
            if !variants.contains(&name) {
                variants.push(name.clone());
            }
            let prefixed = format!(".github/{name}");
            if !variants.contains(&prefixed) {
                variants.push(prefixed);
            }
        }
    }
    variants
}

fn extension(path: &str) -> Option<String> {
    let file = path.rsplit('/').next()?;
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub(crate) fn is_source_file(path: &str) -> bool {
    extension(path).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.as_str()))
}

pub(crate) fn is_documentation_file(path: &str) -> bool {
    extension(path).is_some_and(|ext| DOCUMENTATION_EXTENSIONS.contains(&ext.as_str()))
}

pub(crate) fn is_workflow_file(path: &str) -> bool {
    path.strip_prefix(".github/workflows/")
        .is_some_and(|rest| !rest.contains('/') && (rest.ends_with(".yml") || rest.ends_with(".yaml")))
}
