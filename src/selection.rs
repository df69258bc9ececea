use crate::core::RecordId;
use std::collections::HashSet;

/// Ids picked for bulk operations
///
/// Membership does not depend on the current filtered view: a record stays
/// selected while filtered out, until it is deleted or the selection cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    ids: HashSet<RecordId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add if absent, remove if present; returns whether the id is now selected
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Replace the selection with exactly these ids
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    /// Selected ids in a stable order, for bulk actions
    pub fn ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Drop ids that no longer exist; returns how many were removed
    pub fn prune<'a, I>(&mut self, removed: I) -> usize
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        removed.into_iter().filter(|id| self.ids.remove(*id)).count()
    }

    /// Keep only ids accepted by `keep`; returns how many were dropped
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&RecordId) -> bool,
    {
        let before = self.ids.len();
        self.ids.retain(|id| keep(id));
        before - self.ids.len()
    }
}
