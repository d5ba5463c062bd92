use std::sync::{Arc, Mutex, MutexGuard};

use fleet_types::{Item, ItemDraft};

use crate::error::StoreResult;
use crate::store::ItemStore;

/// Cloneable handle that serializes all access to one [`ItemStore`].
///
/// Every operation acquires the single mutex, runs one store call, and
/// releases it before returning. Store calls are computation-only and never
/// suspend, so the critical section is bounded and cannot deadlock: there
/// is exactly one lock and no nested acquisition. Reads observe only fully
/// committed states.
#[derive(Clone, Debug, Default)]
pub struct SharedItemStore {
    inner: Arc<Mutex<ItemStore>>,
}

impl SharedItemStore {
    /// Create a handle around a fresh empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ItemStore> {
        self.inner.lock().expect("store lock poisoned")
    }

    /// Run one closure as a single critical section over the store.
    ///
    /// This is how a mutation and its follow-up (such as publishing a
    /// change event) stay in the same acquisition, so their order across
    /// requests matches commit order. The closure must be computation-only:
    /// no I/O, no suspension.
    pub fn with<R>(&self, f: impl FnOnce(&mut ItemStore) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`ItemStore::list`].
    pub fn list(&self) -> Vec<Item> {
        self.lock().list()
    }

    /// See [`ItemStore::get`].
    pub fn get(&self, id: &str) -> StoreResult<Item> {
        self.lock().get(id)
    }

    /// See [`ItemStore::create`].
    pub fn create(&self, draft: &ItemDraft) -> StoreResult<Item> {
        self.lock().create(draft)
    }

    /// See [`ItemStore::update`].
    pub fn update(&self, id: &str, draft: &ItemDraft, supplied_version: u64) -> StoreResult<Item> {
        self.lock().update(id, draft, supplied_version)
    }

    /// See [`ItemStore::delete`].
    pub fn delete(&self, id: &str) -> Option<Item> {
        self.lock().delete(id)
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
