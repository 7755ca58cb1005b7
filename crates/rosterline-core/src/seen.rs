//! Seen-identifier tracking for author deduplication

use rustc_hash::FxHashSet;

/// Set of identifiers already emitted during one harvest run.
///
/// Owned by the caller and passed into the harvest routine, so its
/// lifetime is exactly one top-level invocation. A single set shared
/// across institutions means an author listed under a second institution
/// is skipped before any network call; the first-seen association wins.
#[derive(Debug, Default)]
pub struct SeenIds {
    set: FxHashSet<String>,
}

impl SeenIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` if unseen. Returns true exactly once per identifier.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.set.contains(id) {
            return false;
        }
        self.set.insert(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
