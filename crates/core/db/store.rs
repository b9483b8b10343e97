//! Key-indexed record storage.
//!
//! One `RecordStore` per record type, keyed by record id. Lookups, replaces,
//! and removals are O(1); listing returns records in creation order.

use cellwatch_types::cell::GeoCellId;
use cellwatch_types::record::{Asset, Incident, RecordKind, User};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// A record the tracker can store.
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    fn id(&self) -> Uuid;
}

/// A record stamped with a grid cell.
pub trait Located: Record {
    fn cell_id(&self) -> GeoCellId;
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Asset {
    const KIND: RecordKind = RecordKind::Asset;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Located for Asset {
    fn cell_id(&self) -> GeoCellId {
        self.cell_id
    }
}

impl Record for Incident {
    const KIND: RecordKind = RecordKind::Incident;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Located for Incident {
    fn cell_id(&self) -> GeoCellId {
        self.cell_id
    }
}

struct Slot<R> {
    seq: u64,
    record: R,
}

/// Owned map from record id to record.
pub struct RecordStore<R: Record> {
    records: DashMap<Uuid, Slot<R>>,
    next_seq: AtomicU64,
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert a record under its own id. Returns the previous record, if any.
    pub fn insert(&self, record: R) -> Option<R> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.records
            .insert(record.id(), Slot { seq, record })
            .map(|old| old.record)
    }

    pub fn get(&self, id: &Uuid) -> Option<R> {
        self.records.get(id).map(|slot| slot.record.clone())
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.records.contains_key(id)
    }

    /// Replace an existing record, keeping its position in creation order.
    ///
    /// Returns `None` without inserting when `id` is unknown.
    pub fn replace(&self, id: &Uuid, record: R) -> Option<R> {
        debug_assert_eq!(&record.id(), id);
        let mut slot = self.records.get_mut(id)?;
        Some(std::mem::replace(&mut slot.record, record))
    }

    pub fn remove(&self, id: &Uuid) -> Option<R> {
        self.records.remove(id).map(|(_, slot)| slot.record)
    }

    /// All records in creation order.
    pub fn list(&self) -> Vec<R> {
        self.filter(|_| true)
    }

    /// Records matching `predicate`, in creation order.
    pub fn filter<F>(&self, mut predicate: F) -> Vec<R>
    where
        F: FnMut(&R) -> bool,
    {
        let mut matched: Vec<(u64, R)> = self
            .records
            .iter()
            .filter(|entry| predicate(&entry.record))
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();
        matched.sort_unstable_by_key(|(seq, _)| *seq);
        matched.into_iter().map(|(_, record)| record).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Located> RecordStore<R> {
    /// Records stamped with exactly `cell`.
    pub fn in_cell(&self, cell: &GeoCellId) -> Vec<R> {
        self.filter(|r| r.cell_id() == *cell)
    }

    /// Visit the cell of every stored record.
    pub fn for_each_cell<F>(&self, mut f: F)
    where
        F: FnMut(GeoCellId),
    {
        for entry in self.records.iter() {
            f(entry.record.cell_id());
        }
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellwatch_types::record::UserInput;

    fn user(name: &str) -> User {
        User::from_input(
            Uuid::new_v4(),
            UserInput {
                name: name.into(),
                email: format!("{name}@example.com"),
                role: "viewer".into(),
                region: "west".into(),
            },
        )
    }

    #[test]
    fn test_insert_get_remove() {
        let store = RecordStore::new();
        let alice = user("alice");
        assert!(store.insert(alice.clone()).is_none());

        assert_eq!(store.len(), 1);
        assert!(store.contains(&alice.id));
        assert_eq!(store.get(&alice.id), Some(alice.clone()));

        assert_eq!(store.remove(&alice.id), Some(alice.clone()));
        assert!(store.get(&alice.id).is_none());
        assert!(store.remove(&alice.id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_keeps_creation_order() {
        let store = RecordStore::new();
        let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
        for name in names {
            store.insert(user(name));
        }
        let listed: Vec<String> = store.list().into_iter().map(|u| u.name).collect();
        assert_eq!(listed, names);
    }

    #[test]
    fn test_replace_keeps_position() {
        let store = RecordStore::new();
        let first = user("first");
        let second = user("second");
        store.insert(first.clone());
        store.insert(second.clone());

        let mut renamed = first.clone();
        renamed.name = "renamed".into();
        assert_eq!(store.replace(&first.id, renamed.clone()), Some(first));

        let listed = store.list();
        assert_eq!(listed, vec![renamed, second]);
    }

    #[test]
    fn test_replace_unknown_does_not_insert() {
        let store: RecordStore<User> = RecordStore::new();
        let ghost = user("ghost");
        assert!(store.replace(&ghost.id, ghost.clone()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_filter() {
        let store = RecordStore::new();
        store.insert(user("ann"));
        store.insert(user("bob"));
        store.insert(user("amy"));
        let a_names: Vec<String> = store
            .filter(|u| u.name.starts_with('a'))
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(a_names, vec!["ann", "amy"]);
    }
}
