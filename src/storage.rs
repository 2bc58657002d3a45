use std::sync::Arc;

use thiserror::Error;

use crate::item::StoreItem;
use crate::key::DataKey;

/// Errors produced by [Storage] implementations.
///
/// The repository never propagates these to its callers: a failing durable
/// tier is logged and the fast-tier side effects still happen, so a broken
/// disk cannot stop the system from keeping the cache current.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A write against the durable tier failed.
    #[error("storage write failed: {0}")]
    Write(String),
    /// A remove against the durable tier failed.
    #[error("storage remove failed: {0}")]
    Remove(String),
}

/// The optional durable tier of the repository: an unbounded key-value
/// store that becomes the tier of record when configured.
///
/// The on-disk encoding is the implementation's concern; keys persist under
/// their [DataKey] `Display` form. Implementations must be safe for
/// concurrent use from multiple callers.
pub trait Storage: Send + Sync {
    fn get(&self, key: &DataKey) -> Option<StoreItem>;

    fn set(&self, key: &DataKey, item: StoreItem) -> Result<(), StorageError>;

    fn remove(&self, key: &DataKey) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn get(&self, key: &DataKey) -> Option<StoreItem> {
        (**self).get(key)
    }
    fn set(&self, key: &DataKey, item: StoreItem) -> Result<(), StorageError> {
        (**self).set(key, item)
    }
    fn remove(&self, key: &DataKey) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
