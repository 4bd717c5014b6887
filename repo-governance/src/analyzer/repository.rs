//! Repository identity and fetched metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner and name of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepositoryIdentity {
    /// Creates an identity from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses `owner/name` or a `https://github.com/owner/name` URL.
    ///
    /// A trailing `.git` suffix and trailing slashes are ignored. Returns
    /// `None` if either part is missing or more path segments follow.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim().trim_end_matches('/');
        let path = trimmed
            .strip_prefix("https://github.com/")
            .or_else(|| trimmed.strip_prefix("http://github.com/"))
            .or_else(|| trimmed.strip_prefix("github.com/"))
            .unwrap_or(trimmed);
        let path = path.strip_suffix(".git").unwrap_or(path);

        let mut parts = path.split('/');
        let owner = parts.next()?.trim();
        let name = parts.next()?.trim();
        if owner.is_empty() || name.is_empty() || parts.next().is_some() {
            return None;
        }

        Some(Self::new(owner, name))
    }

    /// Returns the `owner/name` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parent of a forked repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParentRepository {
    pub full_name: String,
}

/// Snapshot of `GET /repos/{owner}/{repo}`, limited to the fields checks use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryMetadata {
    /// Default branch name (e.g., "main").
    pub default_branch: String,

    /// Whether this repository is a fork.
    #[serde(default)]
    pub fork: bool,

    /// Upstream repository, present for forks.
    #[serde(default)]
    pub parent: Option<ParentRepository>,

    /// About-box description.
    #[serde(default)]
    pub description: Option<String>,

    /// About-box website.
    #[serde(default)]
    pub homepage: Option<String>,

    /// About-box topics.
    #[serde(default)]
    pub topics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let id = RepositoryIdentity::parse("octocat/hello-world").unwrap();
        assert_eq!(id, RepositoryIdentity::new("octocat", "hello-world"));
        assert_eq!(id.full_name(), "octocat/hello-world");
    }

    #[test]
    fn parses_github_urls() {
        for input in [
            "https://github.com/octocat/hello-world",
            "https://github.com/octocat/hello-world/",
            "https://github.com/octocat/hello-world.git",
            "github.com/octocat/hello-world",
        ] {
            assert_eq!(
                RepositoryIdentity::parse(input),
                Some(RepositoryIdentity::new("octocat", "hello-world")),
                "{input}"
            );
        }
    }

    #[test]
    fn rejects_incomplete_identities() {
        assert!(RepositoryIdentity::parse("octocat").is_none());
        assert!(RepositoryIdentity::parse("octocat/").is_none());
        assert!(RepositoryIdentity::parse("/hello-world").is_none());
        assert!(RepositoryIdentity::parse("a/b/c").is_none());
    }

    #[test]
    fn deserializes_metadata_with_missing_optionals() {
        let metadata: RepositoryMetadata = serde_json::from_str(
            r#"{"default_branch":"main","fork":true,"parent":{"full_name":"up/stream"},"description":null}"#,
        )
        .unwrap();
        assert!(metadata.fork);
        assert_eq!(metadata.parent.unwrap().full_name, "up/stream");
        assert!(metadata.topics.is_empty());
        assert!(metadata.homepage.is_none());
    }
}
