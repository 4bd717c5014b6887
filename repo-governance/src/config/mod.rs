//! Configuration loading.
//!
//! Handles the priority table used by the finding prioritizer. The table is
//! an external, read-only input loaded once per run.

mod error;
mod priority;

pub use error::ConfigError;
pub(crate) use priority::default_top_count;
pub use priority::{PriorityConfig, PriorityEntry, SortStrategy};

use std::path::Path;
use tracing::info;

/// Loads the priority config at `path`, or returns `None` when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError`] if a path is given but cannot be loaded.
pub fn load_priority_config(path: Option<&Path>) -> Result<Option<PriorityConfig>, ConfigError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let config = PriorityConfig::load(path)?;
    info!(
        path = %path.display(),
        entries = config.priority_entries.len(),
        "Loaded priority config"
    );
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn can_load_priority_config_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("priorities.toml");
        fs::write(
            &path,
            r#"
top-count = 2

[[priority]]
title = "Missing README"
priority = 1
"#,
        )
        .unwrap();

        let config = load_priority_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.top_count, 2);
        assert_eq!(config.entry("Missing README").unwrap().priority, 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let result = load_priority_config(Some(&temp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn no_path_means_no_config() {
        assert!(load_priority_config(None).unwrap().is_none());
    }
}
