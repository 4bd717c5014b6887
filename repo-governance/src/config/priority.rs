//! Finding priority table deserialization.

use crate::config::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// How findings are ordered for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Explicit priority table first, severity for unlisted findings.
    #[default]
    Priority,
    /// Severity only.
    Severity,
}

/// One row of the priority table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PriorityEntry {
    /// Finding title this entry applies to.
    pub title: String,

    /// Lower values are shown first.
    pub priority: i64,

    /// Whether an `optional` finding may appear in the top list.
    #[serde(default)]
    pub optional_in_top: bool,
}

/// Parsed priority configuration.
///
/// ```toml
/// top-count = 5
/// sort-strategy = "priority"
///
/// [[priority]]
/// title = "Missing LICENSE"
/// priority = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PriorityConfig {
    /// Priority table rows.
    #[serde(default, rename = "priority")]
    pub priority_entries: Vec<PriorityEntry>,

    /// Number of findings in the top list.
    #[serde(default = "default_top_count")]
    pub top_count: usize,

    /// Ordering strategy.
    #[serde(default)]
    pub sort_strategy: SortStrategy,
}

pub(crate) fn default_top_count() -> usize {
    5
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            priority_entries: Vec::new(),
            top_count: default_top_count(),
            sort_strategy: SortStrategy::Severity,
        }
    }
}

impl PriorityConfig {
    /// Loads and validates a priority config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, malformed,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading priority config");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and validates TOML content. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TomlError`] or [`ConfigError::ValidationError`].
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Returns the entry for `title`, if listed.
    #[must_use]
    pub fn entry(&self, title: &str) -> Option<&PriorityEntry> {
        self.priority_entries.iter().find(|e| e.title == title)
    }

    fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        if self.top_count == 0 {
            return Err(ConfigError::ValidationError {
                path: origin.to_string(),
                message: "top-count must be at least 1".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.priority_entries {
            if entry.title.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    path: origin.to_string(),
                    message: "priority entry has an empty title".to_string(),
                });
            }
            if !seen.insert(entry.title.as_str()) {
                return Err(ConfigError::ValidationError {
                    path: origin.to_string(),
                    message: format!("duplicate priority entry for '{}'", entry.title),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = PriorityConfig::parse(
            r#"
top-count = 3
sort-strategy = "priority"

[[priority]]
title = "Missing LICENSE"
priority = 1

[[priority]]
title = "Missing SUSTAINABILITY.md"
priority = 9
optional-in-top = true
"#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.top_count, 3);
        assert_eq!(config.sort_strategy, SortStrategy::Priority);
        assert_eq!(config.priority_entries.len(), 2);
        assert!(!config.entry("Missing LICENSE").unwrap().optional_in_top);
        assert!(config.entry("Missing SUSTAINABILITY.md").unwrap().optional_in_top);
        assert!(config.entry("Missing README").is_none());
    }

    #[test]
    fn file_defaults_to_priority_strategy() {
        let config = PriorityConfig::parse("", "inline").unwrap();
        assert_eq!(config.sort_strategy, SortStrategy::Priority);
        assert_eq!(config.top_count, 5);
        assert_eq!(PriorityConfig::default().sort_strategy, SortStrategy::Severity);
    }

    #[test]
    fn rejects_duplicates_and_zero_top_count() {
        let duplicate = PriorityConfig::parse(
            r#"
[[priority]]
title = "Missing LICENSE"
priority = 1

[[priority]]
title = "Missing LICENSE"
priority = 2
"#,
            "inline",
        );
        assert!(matches!(duplicate, Err(ConfigError::ValidationError { .. })));

        let zero = PriorityConfig::parse("top-count = 0", "inline");
        assert!(matches!(zero, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let result = PriorityConfig::parse("sort-strategy = \"random\"", "inline");
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }
}
