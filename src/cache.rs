use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lru::LruCache;
use parking_lot::Mutex;

use crate::item::StoreItem;
use crate::key::DataKey;

/// Capacity used by [InMemoryCache::new] and by [crate::RepositoryConfig]
/// when no cache is supplied.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// The bounded fast tier of the repository.
///
/// Implementations must be safe for concurrent use from multiple callers;
/// the repository adds no locking of its own.
pub trait Cache: Send + Sync {
    /// Insert or replace the entry for `key`. Returns true if an unrelated
    /// entry was evicted to make room.
    fn set(&self, key: DataKey, item: StoreItem) -> bool;

    fn get(&self, key: &DataKey) -> Option<StoreItem>;

    /// Remove the entry for `key`, returning whether it was present.
    /// Removing an absent key is not an error.
    fn remove(&self, key: &DataKey) -> bool;

    fn contains(&self, key: &DataKey) -> bool;

    fn keys(&self) -> Vec<DataKey>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    fn purge(&self);

    /// Change the capacity, returning how many entries were evicted to fit
    /// the new bound.
    fn resize(&self, capacity: usize) -> usize;

    /// Time of the last mutation, or `None` if the cache was never mutated.
    fn updated(&self) -> Option<DateTime<Utc>>;
}

impl<T: Cache + ?Sized> Cache for Arc<T> {
    fn set(&self, key: DataKey, item: StoreItem) -> bool {
        (**self).set(key, item)
    }
    fn get(&self, key: &DataKey) -> Option<StoreItem> {
        (**self).get(key)
    }
    fn remove(&self, key: &DataKey) -> bool {
        (**self).remove(key)
    }
    fn contains(&self, key: &DataKey) -> bool {
        (**self).contains(key)
    }
    fn keys(&self) -> Vec<DataKey> {
        (**self).keys()
    }
    fn len(&self) -> usize {
        (**self).len()
    }
    fn purge(&self) {
        (**self).purge()
    }
    fn resize(&self, capacity: usize) -> usize {
        (**self).resize(capacity)
    }
    fn updated(&self) -> Option<DateTime<Utc>> {
        (**self).updated()
    }
}

struct CacheState {
    entries: LruCache<DataKey, StoreItem>,
    updated: Option<DateTime<Utc>>,
}

/// Default [Cache] implementation: a bounded LRU map guarded by a mutex.
///
/// Lookups count as use for eviction ordering, so a hot flag stays resident
/// even under churn from full refreshes.
pub struct InMemoryCache {
    state: Mutex<CacheState>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A zero capacity is clamped to one entry.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(clamp_capacity(capacity)),
                updated: None,
            }),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache for InMemoryCache {
    fn set(&self, key: DataKey, item: StoreItem) -> bool {
        let mut state = self.state.lock();
        // push reports the displaced LRU entry; a returned key equal to the
        // inserted one is a same-key replacement, not an eviction.
        let evicted = match state.entries.push(key.clone(), item) {
            Some((displaced, _)) => displaced != key,
            None => false,
        };
        state.updated = Some(Utc::now());
        evicted
    }

    fn get(&self, key: &DataKey) -> Option<StoreItem> {
        self.state.lock().entries.get(key).cloned()
    }

    fn remove(&self, key: &DataKey) -> bool {
        let mut state = self.state.lock();
        let present = state.entries.pop(key).is_some();
        if present {
            state.updated = Some(Utc::now());
        }
        present
    }

    fn contains(&self, key: &DataKey) -> bool {
        self.state.lock().entries.contains(key)
    }

    fn keys(&self) -> Vec<DataKey> {
        self.state
            .lock()
            .entries
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    fn purge(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.updated = Some(Utc::now());
    }

    fn resize(&self, capacity: usize) -> usize {
        let mut state = self.state.lock();
        let before = state.entries.len();
        state.entries.resize(clamp_capacity(capacity));
        let evicted = before - state.entries.len();
        if evicted > 0 {
            state.updated = Some(Utc::now());
        }
        evicted
    }

    fn updated(&self) -> Option<DateTime<Utc>> {
        self.state.lock().updated
    }
}

fn clamp_capacity(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}
