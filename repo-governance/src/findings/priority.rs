//! Deterministic display ordering for findings.

use super::{Finding, Severity};
use crate::config::{default_top_count, PriorityConfig, PriorityEntry, SortStrategy};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sorts findings into display order.
///
/// Without a config, or with [`SortStrategy::Severity`], findings are ordered
/// by severity. With [`SortStrategy::Priority`], findings listed in the
/// priority table come first in ascending priority, and unlisted findings
/// follow in severity order. The sort is stable: ties keep their input order.
pub fn sort_findings(findings: &mut [Finding], config: Option<&PriorityConfig>) {
    let order = DisplayOrder::new(config);
    findings.sort_by(|a, b| order.compare(a, b));
}

/// Returns the leading findings of the display order.
///
/// `optional` findings are left out unless their priority entry sets
/// `optional-in-top`. At most `top-count` findings are returned (5 without a
/// config).
#[must_use]
pub fn top_findings<'a>(
    findings: &'a [Finding],
    config: Option<&PriorityConfig>,
) -> Vec<&'a Finding> {
    let order = DisplayOrder::new(config);
    let top_count = config.map_or_else(default_top_count, |c| c.top_count);

    let mut ordered: Vec<&Finding> = findings.iter().collect();
    ordered.sort_by(|a, b| order.compare(a, b));
    ordered
        .into_iter()
        .filter(|f| f.severity != Severity::Optional || order.optional_in_top(&f.title))
        .take(top_count)
        .collect()
}

/// Comparator state built once per sort.
struct DisplayOrder<'a> {
    table: HashMap<&'a str, &'a PriorityEntry>,
    by_priority: bool,
}

impl<'a> DisplayOrder<'a> {
    fn new(config: Option<&'a PriorityConfig>) -> Self {
        let table = config
            .map(|c| {
                c.priority_entries
                    .iter()
                    .map(|entry| (entry.title.as_str(), entry))
                    .collect()
            })
            .unwrap_or_default();
        let by_priority = config.is_some_and(|c| c.sort_strategy == SortStrategy::Priority);
        Self { table, by_priority }
    }

    fn priority(&self, title: &str) -> Option<i64> {
        self.table.get(title).map(|entry| entry.priority)
    }

    fn optional_in_top(&self, title: &str) -> bool {
        self.table.get(title).is_some_and(|entry| entry.optional_in_top)
    }

    fn compare(&self, a: &Finding, b: &Finding) -> Ordering {
        if !self.by_priority {
            return a.severity.cmp(&b.severity);
        }
        match (self.priority(&a.title), self.priority(&b.title)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.severity.cmp(&b.severity),
        }
    }
}
