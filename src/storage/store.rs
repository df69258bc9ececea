use crate::core::{GridError, PermissionKey, Record, RecordId, Result, Role};
use im::Vector;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Snapshot of the collection handed to readers
///
/// Structurally shared with the store, so taking one is O(1) and later
/// mutations of the store never show through it.
pub type Collection = Vector<Arc<Record>>;

/// Canonical, insertion-ordered collection of records
///
/// Newest records sit at the front. Ids are unique within the store.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    records: Collection,
    ids: HashSet<RecordId>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire collection
    ///
    /// Fails without touching the current collection if the batch repeats an id.
    pub fn load(&mut self, records: Vec<Record>) -> Result<()> {
        let mut ids = HashSet::with_capacity(records.len());
        for record in &records {
            if !ids.insert(record.id().clone()) {
                return Err(GridError::DuplicateId(record.id().clone()));
            }
        }

        self.records = records.into_iter().map(Arc::new).collect();
        self.ids = ids;
        debug!("store loaded with {} records", self.records.len());
        Ok(())
    }

    /// Prepend a record so it surfaces first
    pub fn add(&mut self, record: Record) -> Result<()> {
        if self.ids.contains(record.id()) {
            return Err(GridError::DuplicateId(record.id().clone()));
        }

        self.ids.insert(record.id().clone());
        self.records.push_front(Arc::new(record));
        Ok(())
    }

    /// Remove a record; returns false when the id is unknown
    pub fn delete(&mut self, id: &RecordId) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.records.remove(pos);
                self.ids.remove(id);
                true
            }
            None => false,
        }
    }

    /// Remove every record whose id is listed, returning the ids actually removed
    pub fn delete_many(&mut self, ids: &[RecordId]) -> Vec<RecordId> {
        let doomed: HashSet<&RecordId> = ids.iter().filter(|id| self.ids.contains(*id)).collect();
        if doomed.is_empty() {
            return Vec::new();
        }

        let removed: Vec<RecordId> = doomed.iter().map(|id| (*id).clone()).collect();
        self.records.retain(|record| !doomed.contains(record.id()));
        for id in &removed {
            self.ids.remove(id);
        }
        removed
    }

    /// Replace the role and reset permissions to its defaults
    pub fn set_role(&mut self, id: &RecordId, role: Role) -> Result<()> {
        self.update_with(id, |record| record.assign_role(role))?;
        Ok(())
    }

    /// Set a single permission flag, leaving the role alone
    pub fn set_permission(&mut self, id: &RecordId, key: PermissionKey, value: bool) -> Result<()> {
        self.update_with(id, |record| record.permissions.set(key, value))?;
        Ok(())
    }

    /// Flip the pin flag; returns the new value
    pub fn toggle_pin(&mut self, id: &RecordId) -> Result<bool> {
        let updated = self.update_with(id, |record| record.is_pinned = !record.is_pinned)?;
        Ok(updated.is_pinned)
    }

    /// Overwrite a whole record in place, keeping its position
    ///
    /// Returns the record that was replaced.
    pub fn replace(&mut self, record: Record) -> Result<Arc<Record>> {
        let pos = self
            .position(record.id())
            .ok_or_else(|| GridError::RecordNotFound(record.id().clone()))?;
        Ok(self.records.set(pos, Arc::new(record)))
    }

    pub fn get(&self, id: &RecordId) -> Option<Arc<Record>> {
        if !self.ids.contains(id) {
            return None;
        }
        self.records.iter().find(|record| record.id() == id).cloned()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn snapshot(&self) -> Collection {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        if !self.ids.contains(id) {
            return None;
        }
        self.records.iter().position(|record| record.id() == id)
    }

    fn update_with<F>(&mut self, id: &RecordId, f: F) -> Result<Arc<Record>>
    where
        F: FnOnce(&mut Record),
    {
        let pos = self
            .position(id)
            .ok_or_else(|| GridError::RecordNotFound(id.clone()))?;

        let mut record = (*self.records[pos]).clone();
        f(&mut record);
        let updated = Arc::new(record);
        self.records.set(pos, Arc::clone(&updated));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;

    fn record(id: &str, name: &str) -> Record {
        Record::new(id, name, format!("{}@company.com", name.to_lowercase()))
    }

    fn names(store: &EntityStore) -> Vec<String> {
        store.snapshot().iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_add_prepends() {
        let mut store = EntityStore::new();
        store.add(record("user-1", "Ann")).unwrap();
        store.add(record("user-2", "Bob")).unwrap();

        assert_eq!(names(&store), vec!["Bob", "Ann"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_duplicate_id() {
        let mut store = EntityStore::new();
        store.add(record("user-1", "Ann")).unwrap();

        let err = store.add(record("user-1", "Impostor")).unwrap_err();
        assert_eq!(err, GridError::DuplicateId(RecordId::new("user-1")));
        assert_eq!(names(&store), vec!["Ann"]);
    }

    #[test]
    fn test_load_rejects_duplicates_and_keeps_old() {
        let mut store = EntityStore::new();
        store.load(vec![record("user-1", "Ann")]).unwrap();

        let result = store.load(vec![record("user-2", "Bob"), record("user-2", "Bob again")]);
        assert!(matches!(result, Err(GridError::DuplicateId(_))));
        assert_eq!(names(&store), vec!["Ann"]);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = EntityStore::new();
        store.load(vec![record("user-1", "Ann"), record("user-2", "Bob")]).unwrap();

        assert!(!store.delete(&RecordId::new("user-9")));
        assert!(store.delete(&RecordId::new("user-1")));
        assert_eq!(names(&store), vec!["Bob"]);
        assert!(!store.contains(&RecordId::new("user-1")));
    }

    #[test]
    fn test_delete_many() {
        let mut store = EntityStore::new();
        store
            .load(vec![record("user-1", "Ann"), record("user-2", "Bob"), record("user-3", "Cid")])
            .unwrap();

        let mut removed = store.delete_many(&[
            RecordId::new("user-3"),
            RecordId::new("user-1"),
            RecordId::new("user-404"),
        ]);
        removed.sort();

        assert_eq!(removed, vec![RecordId::new("user-1"), RecordId::new("user-3")]);
        assert_eq!(names(&store), vec!["Bob"]);
    }

    #[test]
    fn test_set_role_resets_permission_overrides() {
        let mut store = EntityStore::new();
        store.add(record("user-1", "Ann").role(Role::Viewer)).unwrap();
        let id = RecordId::new("user-1");

        store.set_permission(&id, PermissionKey::CanDelete, true).unwrap();
        let current = store.get(&id).unwrap();
        assert!(current.permissions.can_delete);
        assert_eq!(current.role, Role::Viewer);

        store.set_role(&id, Role::Editor).unwrap();
        let current = store.get(&id).unwrap();
        assert_eq!(current.permissions, Role::Editor.default_permissions());
        assert!(!current.permissions.can_delete);
    }

    #[test]
    fn test_toggle_pin_and_missing_id() {
        let mut store = EntityStore::new();
        store.add(record("user-1", "Ann")).unwrap();
        let id = RecordId::new("user-1");

        assert!(store.toggle_pin(&id).unwrap());
        assert!(!store.toggle_pin(&id).unwrap());
        assert!(matches!(
            store.toggle_pin(&RecordId::new("user-2")),
            Err(GridError::RecordNotFound(_))
        ));
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut store = EntityStore::new();
        store.add(record("user-1", "Ann")).unwrap();
        let before = store.snapshot();

        let mut edited = (*store.get(&RecordId::new("user-1")).unwrap()).clone();
        edited.status = Status::Inactive;
        let previous = store.replace(edited).unwrap();

        assert_eq!(previous.status, Status::Active);
        assert_eq!(before[0].status, Status::Active);
        assert_eq!(store.snapshot()[0].status, Status::Inactive);
    }
}
