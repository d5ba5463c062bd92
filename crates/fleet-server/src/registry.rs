use fleet_feed::{ChangeFeed, EventStream};
use fleet_store::{SharedItemStore, StoreResult};
use fleet_types::{ChangeEvent, Item, ItemDraft};

/// Couples the record store with the change feed.
///
/// Every accepted mutation publishes its event while still holding the
/// store mutex, so events enter the feed in exactly the order mutations
/// committed; the broadcast channel preserves that order per observer.
/// Publishing is a non-blocking channel send, so the critical section
/// stays bounded and suspension-free.
///
/// Constructed once at startup and injected into the router; handlers
/// receive clones of the handle, never ambient globals.
#[derive(Clone, Debug)]
pub struct Registry {
    store: SharedItemStore,
    feed: ChangeFeed,
}

impl Registry {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            store: SharedItemStore::new(),
            feed: ChangeFeed::new(channel_capacity),
        }
    }

    /// The underlying feed handle (tests observe broadcasts through it).
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Register a new observer of committed mutations.
    pub fn subscribe(&self) -> EventStream {
        self.feed.subscribe()
    }

    /// Snapshot of all records in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.store.list()
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &str) -> StoreResult<Item> {
        self.store.get(id)
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Create a record and broadcast `created`.
    pub fn create(&self, draft: &ItemDraft) -> StoreResult<Item> {
        self.store.with(|store| {
            let item = store.create(draft)?;
            self.feed.publish(ChangeEvent::Created { item: item.clone() });
            Ok(item)
        })
    }

    /// Update a record under the optimistic version check and broadcast
    /// `updated`. Rejected writes publish nothing.
    pub fn update(&self, id: &str, draft: &ItemDraft, supplied_version: u64) -> StoreResult<Item> {
        self.store.with(|store| {
            let item = store.update(id, draft, supplied_version)?;
            self.feed.publish(ChangeEvent::Updated { item: item.clone() });
            Ok(item)
        })
    }

    /// Remove a record if present; broadcast `deleted` only when one
    /// actually went away.
    pub fn delete(&self, id: &str) -> Option<Item> {
        self.store.with(|store| {
            let item = store.delete(id)?;
            self.feed.publish(ChangeEvent::Deleted { item: item.clone() });
            Some(item)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tokio::sync::broadcast::error::TryRecvError;

    fn draft(model: &str) -> ItemDraft {
        ItemDraft {
            marca: Some("Dacia".to_string()),
            model: Some(model.to_string()),
            an: Some(2020),
            culoare: Some("alb".to_string()),
            nr_inmatriculare: Some("CJ-01-ABC".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn starts_empty_with_no_observers() {
        let registry = Registry::new(8);
        assert!(registry.is_empty());
        assert_eq!(registry.feed().observer_count(), 0);
    }

    #[test]
    fn rejected_writes_publish_nothing() {
        let registry = Registry::new(8);
        let mut events = registry.subscribe();
        registry.create(&draft("Logan")).unwrap();

        registry.create(&ItemDraft::default()).unwrap_err();
        registry.update("1", &draft("Logan Plus"), 0).unwrap_err();
        registry.update("9", &draft("Logan Plus"), 1).unwrap_err();
        assert!(registry.delete("9").is_none());

        assert_eq!(events.try_recv().unwrap().kind(), "created");
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn concurrent_creates_broadcast_in_commit_order() {
        let registry = Registry::new(1024);
        let mut events = registry.subscribe();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        registry.create(&draft("Logan")).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }

        // Ids are assigned under the same lock that publishes, so broadcast
        // order must be exactly id order.
        let mut last = 0u64;
        for _ in 0..100 {
            let event = events.try_recv().unwrap();
            assert_eq!(event.kind(), "created");
            let id: u64 = event.item().id.parse().unwrap();
            assert!(
                id > last,
                "commit order violated: id {id} broadcast after id {last}"
            );
            last = id;
        }
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn concurrent_updates_broadcast_versions_in_commit_order() {
        let registry = Registry::new(1024);
        registry.create(&draft("Logan")).unwrap();
        let mut events = registry.subscribe();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        // Optimistic retry: re-read, attempt, repeat on conflict.
                        loop {
                            let seen = registry.get("1").unwrap().version;
                            match registry.update("1", &ItemDraft::default(), seen) {
                                Ok(_) => break,
                                Err(fleet_store::StoreError::VersionConflict { .. }) => continue,
                                Err(other) => panic!("unexpected error: {other}"),
                            }
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }

        let mut last = 1u64;
        for _ in 0..40 {
            let event = events.try_recv().unwrap();
            assert_eq!(event.kind(), "updated");
            let version = event.item().version;
            assert_eq!(version, last + 1, "versions must broadcast in commit order");
            last = version;
        }
        assert_eq!(registry.get("1").unwrap().version, 41);
    }
}
