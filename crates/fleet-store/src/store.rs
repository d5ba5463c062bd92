use chrono::Utc;

use fleet_types::{Item, ItemDraft};

use crate::error::{StoreError, StoreResult};

/// The authoritative in-memory collection of records.
///
/// Records are kept in insertion order. Identifiers are derived from a
/// monotonic counter and are never reused, even after deletion. The store
/// performs no locking of its own — callers serialize access through
/// [`SharedItemStore`](crate::SharedItemStore) — and no operation here
/// performs I/O or suspends.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    last_id: u64,
}

impl ItemStore {
    /// Create a new empty store. The first assigned identifier will be `"1"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of all records in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &str) -> StoreResult<Item> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Create a record from a draft.
    ///
    /// All domain fields must be present and non-blank; otherwise a
    /// `Validation` error lists the missing ones. On success the record
    /// gets the next identifier, version 1, and a fresh timestamp. Any id
    /// or version carried by the draft is ignored.
    pub fn create(&mut self, draft: &ItemDraft) -> StoreResult<Item> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation {
                missing: missing.iter().map(|f| f.to_string()).collect(),
            });
        }

        self.last_id += 1;
        let item = Item {
            id: self.last_id.to_string(),
            marca: draft.marca.clone().unwrap_or_default(),
            model: draft.model.clone().unwrap_or_default(),
            an: draft.an.unwrap_or_default(),
            culoare: draft.culoare.clone().unwrap_or_default(),
            nr_inmatriculare: draft.nr_inmatriculare.clone().unwrap_or_default(),
            date: Utc::now(),
            version: 1,
        };
        self.items.push(item.clone());
        Ok(item)
    }

    /// Apply a draft to an existing record under an optimistic version check.
    ///
    /// A supplied version strictly older than the stored one is rejected
    /// with `VersionConflict` and the store is left untouched. Equal or
    /// newer supplied versions are accepted: a client that read a fresher
    /// state than our counter is not a stale writer. The accepted write
    /// stores `max(supplied, current) + 1`, refreshes the timestamp, and
    /// keeps the record at its original position. Fields omitted from the
    /// draft retain their stored values.
    pub fn update(&mut self, id: &str, draft: &ItemDraft, supplied_version: u64) -> StoreResult<Item> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let current = self.items[pos].version;
        if supplied_version < current {
            return Err(StoreError::VersionConflict {
                id: id.to_string(),
                supplied: supplied_version,
                current,
            });
        }

        let existing = &self.items[pos];
        let updated = Item {
            id: existing.id.clone(),
            marca: draft.marca.clone().unwrap_or_else(|| existing.marca.clone()),
            model: draft.model.clone().unwrap_or_else(|| existing.model.clone()),
            an: draft.an.unwrap_or(existing.an),
            culoare: draft
                .culoare
                .clone()
                .unwrap_or_else(|| existing.culoare.clone()),
            nr_inmatriculare: draft
                .nr_inmatriculare
                .clone()
                .unwrap_or_else(|| existing.nr_inmatriculare.clone()),
            date: Utc::now(),
            version: supplied_version.max(current) + 1,
        };
        self.items[pos] = updated.clone();
        Ok(updated)
    }

    /// Remove a record. Returns the removed record, or `None` if the id is
    /// unknown — absence is not an error, so deletion stays idempotent.
    pub fn delete(&mut self, id: &str) -> Option<Item> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }
}
