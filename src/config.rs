use crate::cache::{Cache, InMemoryCache, DEFAULT_CACHE_CAPACITY};
use crate::callback::Callback;
use crate::repository::Repository;
use crate::storage::Storage;

/// Assemble-then-build configuration for a [Repository].
///
/// Every field is independently settable in any order; all defaulting and
/// wiring happens in one pass inside [RepositoryConfig::build], so there are
/// no order-sensitive interactions between settings.
pub struct RepositoryConfig {
    cache: Option<Box<dyn Cache>>,
    storage: Option<Box<dyn Storage>>,
    callback: Option<Box<dyn Callback>>,
    cache_capacity: usize,
}

impl RepositoryConfig {
    pub fn new() -> Self {
        Self {
            cache: None,
            storage: None,
            callback: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Use a custom fast tier instead of the default [InMemoryCache].
    pub fn cache(mut self, cache: Box<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attach a durable store, making it the tier of record.
    pub fn storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Observe accepted stores and deletes.
    pub fn callback(mut self, callback: Box<dyn Callback>) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Capacity of the default cache; ignored when a cache is supplied.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// The single wiring pass: defaults the cache if none was supplied and
    /// assembles the repository.
    pub fn build(self) -> Repository {
        let cache = self
            .cache
            .unwrap_or_else(|| Box::new(InMemoryCache::with_capacity(self.cache_capacity)));
        Repository::assemble(cache, self.storage, self.callback)
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
