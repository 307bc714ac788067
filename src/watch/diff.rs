//! Snapshot comparison
//!
//! Classifies membership changes between two identifier snapshots. The
//! watcher turns the result into created/deleted events.

use std::collections::HashSet;

/// Membership changes between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Identifiers present now but not before, in current-list order
    pub added: Vec<String>,
    /// Identifiers present before but gone now, in previous-list order
    pub removed: Vec<String>,
}

impl ChangeSet {
    /// Check whether nothing changed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Diff two identifier snapshots.
///
/// Both inputs are treated as sets: duplicates collapse, presence is
/// binary. Each output list preserves the encounter order of its source
/// list (`added` scans `current`, `removed` scans `previous`).
pub fn diff_snapshots(previous: &[String], current: &[String]) -> ChangeSet {
    let previous_set: HashSet<&str> = previous.iter().map(String::as_str).collect();
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();

    let mut added = Vec::new();
    let mut seen = HashSet::new();
    for name in current {
        if !previous_set.contains(name.as_str()) && seen.insert(name.as_str()) {
            added.push(name.clone());
        }
    }

    let mut removed = Vec::new();
    let mut seen = HashSet::new();
    for name in previous {
        if !current_set.contains(name.as_str()) && seen.insert(name.as_str()) {
            removed.push(name.clone());
        }
    }

    ChangeSet { added, removed }
}
