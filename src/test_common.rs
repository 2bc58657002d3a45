#![cfg(test)]

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::callback::Callback;
use crate::item::StoreItem;
use crate::key::DataKey;
use crate::storage::{Storage, StorageError};

/// Unbounded map-backed durable store.
#[derive(Default)]
pub struct TestStorage {
    entries: Mutex<HashMap<DataKey, StoreItem>>,
}

impl TestStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry directly, bypassing the repository write path.
    pub fn insert(&self, key: DataKey, item: StoreItem) {
        self.entries.lock().insert(key, item);
    }

    pub fn contains(&self, key: &DataKey) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Inspect an entry without going through the [Storage] trait.
    pub fn stored(&self, key: &DataKey) -> Option<StoreItem> {
        self.entries.lock().get(key).cloned()
    }
}

impl Storage for TestStorage {
    fn get(&self, key: &DataKey) -> Option<StoreItem> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &DataKey, item: StoreItem) -> Result<(), StorageError> {
        self.entries.lock().insert(key.clone(), item);
        Ok(())
    }

    fn remove(&self, key: &DataKey) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Durable store whose writes and removes always fail.
pub struct FailingStorage;

impl Storage for FailingStorage {
    fn get(&self, _key: &DataKey) -> Option<StoreItem> {
        None
    }

    fn set(&self, key: &DataKey, _item: StoreItem) -> Result<(), StorageError> {
        Err(StorageError::Write(format!("disk full while writing {}", key)))
    }

    fn remove(&self, key: &DataKey) -> Result<(), StorageError> {
        Err(StorageError::Remove(format!("io error removing {}", key)))
    }
}

/// Records every notification in invocation order.
#[derive(Default)]
pub struct RecordingCallback {
    events: Mutex<Vec<String>>,
}

impl RecordingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Callback for RecordingCallback {
    fn on_flag_stored(&self, identifier: &str) {
        self.events.lock().push(format!("flag stored: {}", identifier));
    }

    fn on_flags_stored(&self, env_id: &str) {
        self.events.lock().push(format!("flags stored: {}", env_id));
    }

    fn on_flag_deleted(&self, identifier: &str) {
        self.events.lock().push(format!("flag deleted: {}", identifier));
    }

    fn on_segment_stored(&self, identifier: &str) {
        self.events
            .lock()
            .push(format!("segment stored: {}", identifier));
    }

    fn on_segments_stored(&self, env_id: &str) {
        self.events
            .lock()
            .push(format!("segments stored: {}", env_id));
    }

    fn on_segment_deleted(&self, identifier: &str) {
        self.events
            .lock()
            .push(format!("segment deleted: {}", identifier));
    }
}
