//! Memoized organization probe results.

use std::collections::HashMap;

/// What an inheritance probe is looking for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProbeKey {
    /// The `{owner}/.github` repository itself.
    GithubRepository,
    /// A file inside `{owner}/.github`.
    File(String),
}

/// Result of a single existence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The target exists.
    Found,
    /// GitHub reported the target as missing.
    NotFound,
    /// The probe failed for another reason; treated as absent.
    Unavailable,
}

impl ProbeOutcome {
    /// Returns true only for [`ProbeOutcome::Found`].
    #[must_use]
    pub fn exists(self) -> bool {
        self == Self::Found
    }
}

/// Mapping from `(owner, probe key)` to the first observed outcome.
///
/// Scoped to one analyzer, and therefore to one batch run. An entry is never
/// overwritten once recorded.
#[derive(Debug, Default)]
pub struct OrgInheritanceCache {
    entries: HashMap<(String, ProbeKey), ProbeOutcome>,
}

impl OrgInheritanceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded outcome for `(owner, key)`.
    #[must_use]
    pub fn get(&self, owner: &str, key: &ProbeKey) -> Option<ProbeOutcome> {
        self.entries.get(&(normalize_owner(owner), key.clone())).copied()
    }

    /// Records an outcome unless one already exists, returning the stored value.
    pub fn record(&mut self, owner: &str, key: ProbeKey, outcome: ProbeOutcome) -> ProbeOutcome {
        *self
            .entries
            .entry((normalize_owner(owner), key))
            .or_insert(outcome)
    }

    /// Number of memoized probes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been probed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// GitHub logins are case-insensitive.
fn normalize_owner(owner: &str) -> String {
    owner.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_outcome_wins() {
        let mut cache = OrgInheritanceCache::new();
        let key = ProbeKey::File("SECURITY.md".to_string());

        assert_eq!(
            cache.record("acme", key.clone(), ProbeOutcome::NotFound),
            ProbeOutcome::NotFound
        );
        assert_eq!(
            cache.record("acme", key.clone(), ProbeOutcome::Found),
            ProbeOutcome::NotFound
        );
        assert_eq!(cache.get("acme", &key), Some(ProbeOutcome::NotFound));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn owner_lookup_ignores_case() {
        let mut cache = OrgInheritanceCache::new();
        cache.record("Acme", ProbeKey::GithubRepository, ProbeOutcome::Found);
        assert_eq!(
            cache.get("acme", &ProbeKey::GithubRepository),
            Some(ProbeOutcome::Found)
        );
        assert!(cache.get("other", &ProbeKey::GithubRepository).is_none());
    }

    #[test]
    fn only_found_exists() {
        assert!(ProbeOutcome::Found.exists());
        assert!(!ProbeOutcome::NotFound.exists());
        assert!(!ProbeOutcome::Unavailable.exists());
    }
}
