//! Analysis targets.

use super::error::RunnerError;
use crate::analyzer::RepositoryIdentity;
use std::fmt;

/// What a run analyzes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single `owner/name` repository.
    Repository(RepositoryIdentity),
    /// Every repository of a user or organization.
    Account(String),
}

impl Target {
    /// Parses `owner/name`, a GitHub URL, or a bare login.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidTarget`] for empty or malformed input.
    pub fn parse(input: &str) -> Result<Self, RunnerError> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(RunnerError::InvalidTarget(input.to_string()));
        }

        if let Some(identity) = RepositoryIdentity::parse(trimmed) {
            return Ok(Self::Repository(identity));
        }

        let login = trimmed
            .strip_prefix("https://github.com/")
            .or_else(|| trimmed.strip_prefix("http://github.com/"))
            .or_else(|| trimmed.strip_prefix("github.com/"))
            .unwrap_or(trimmed);
        if login.contains('/') || login.chars().any(char::is_whitespace) {
            return Err(RunnerError::InvalidTarget(input.to_string()));
        }
        Ok(Self::Account(login.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository(identity) => write!(f, "{identity}"),
            Self::Account(login) => f.write_str(login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repository_targets() {
        assert_eq!(
            Target::parse("acme/widgets").unwrap(),
            Target::Repository(RepositoryIdentity::new("acme", "widgets"))
        );
        assert_eq!(
            Target::parse("https://github.com/acme/widgets.git").unwrap(),
            Target::Repository(RepositoryIdentity::new("acme", "widgets"))
        );
    }

    #[test]
    fn parses_account_targets() {
        assert_eq!(
            Target::parse("acme").unwrap(),
            Target::Account("acme".to_string())
        );
        assert_eq!(
            Target::parse("https://github.com/acme/").unwrap(),
            Target::Account("acme".to_string())
        );
    }

    #[test]
    fn rejects_empty_target() {
        assert!(matches!(
            Target::parse("  "),
            Err(RunnerError::InvalidTarget(_))
        ));
    }
}
