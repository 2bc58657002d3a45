use log::{debug, error};

use crate::cache::Cache;
use crate::callback::Callback;
use crate::error::Error;
use crate::flag::Flag;
use crate::item::StoreItem;
use crate::key::DataKey;
use crate::segment::Segment;
use crate::storage::Storage;

/// Tiered repository for flag and segment definitions.
///
/// Writes come from a periodic full-refresh poller and an incremental
/// streaming handler racing each other; version-ordered write rejection
/// guarantees the evaluation engine reading from here never observes a
/// regression to an older definition.
///
/// The cache is the fast tier and, when a [Storage] is configured, the
/// durable tier is the tier of record: accepted writes persist there and
/// evict the key from the cache, so the next read repopulates the cache
/// with an explicit cache-fill instead of serving a stale copy.
///
/// Both tiers are injected, externally owned, and expected to be safe for
/// concurrent use; the repository performs no locking and no blocking I/O
/// of its own. The staleness check and the subsequent write are not atomic
/// across concurrent writers for the same identifier; callers needing
/// strict linearizability must serialize those writes externally.
pub struct Repository {
    cache: Box<dyn Cache>,
    storage: Option<Box<dyn Storage>>,
    callback: Option<Box<dyn Callback>>,
}

impl Repository {
    /// Repository with only the fast tier.
    pub fn new(cache: Box<dyn Cache>) -> Self {
        Self {
            cache,
            storage: None,
            callback: None,
        }
    }

    /// Repository backed by a durable store.
    pub fn with_storage(cache: Box<dyn Cache>, storage: Box<dyn Storage>) -> Self {
        Self {
            cache,
            storage: Some(storage),
            callback: None,
        }
    }

    /// Repository backed by a durable store, with an observer on mutations.
    pub fn with_storage_and_callback(
        cache: Box<dyn Cache>,
        storage: Box<dyn Storage>,
        callback: Box<dyn Callback>,
    ) -> Self {
        Self {
            cache,
            storage: Some(storage),
            callback: Some(callback),
        }
    }

    pub(crate) fn assemble(
        cache: Box<dyn Cache>,
        storage: Option<Box<dyn Storage>>,
        callback: Option<Box<dyn Callback>>,
    ) -> Self {
        Self {
            cache,
            storage,
            callback,
        }
    }

    /// Returns the flag from the cache, or from the durable store on a
    /// cache miss (filling the cache with the found value).
    pub fn get_flag(&self, identifier: &str) -> Result<Flag, Error> {
        self.get_flag_and_cache(identifier, true)
    }

    /// Full-collection retrieval is not implemented; callers wanting every
    /// flag re-fetch from the source instead. Never returns partial data.
    pub fn get_flags(&self) -> Vec<Flag> {
        Vec::new()
    }

    /// Returns the segment from the cache, or from the durable store on a
    /// cache miss (filling the cache with the found value).
    pub fn get_segment(&self, identifier: &str) -> Result<Segment, Error> {
        self.get_segment_and_cache(identifier, true)
    }

    /// Stores a flag, unless it is stale relative to what is already held.
    /// Stale writes are dropped silently; `initial_load` bypasses the
    /// version check entirely.
    pub fn set_flag(&self, flag: Flag, initial_load: bool) {
        if !initial_load && self.is_flag_outdated(&flag) {
            debug!("dropping stale write for flag {}", flag.feature);
            return;
        }
        let identifier = flag.feature.clone();
        self.store(DataKey::Flag(identifier.clone()), StoreItem::Flag(flag));
        if let Some(callback) = &self.callback {
            callback.on_flag_stored(&identifier);
        }
    }

    /// Stores the flag collection for an environment. If any element of the
    /// batch is stale, the entire batch is rejected; there is no partial
    /// apply.
    pub fn set_flags(&self, initial_load: bool, env_id: &str, flags: Vec<Flag>) {
        if !initial_load && flags.iter().any(|flag| self.is_flag_outdated(flag)) {
            debug!("dropping stale flag collection write for env {}", env_id);
            return;
        }
        self.store(DataKey::flags(env_id), StoreItem::Flags(flags));
        if let Some(callback) = &self.callback {
            callback.on_flags_stored(env_id);
        }
    }

    /// Stores a segment, unless it is stale relative to what is already
    /// held. Stale writes are dropped silently; `initial_load` bypasses the
    /// version check entirely.
    pub fn set_segment(&self, segment: Segment, initial_load: bool) {
        if !initial_load && self.is_segment_outdated(&segment) {
            debug!("dropping stale write for segment {}", segment.identifier);
            return;
        }
        let identifier = segment.identifier.clone();
        self.store(
            DataKey::Segment(identifier.clone()),
            StoreItem::Segment(segment),
        );
        if let Some(callback) = &self.callback {
            callback.on_segment_stored(&identifier);
        }
    }

    /// Stores the segment collection for an environment, with the same
    /// whole-batch staleness rejection as [Repository::set_flags].
    pub fn set_segments(&self, initial_load: bool, env_id: &str, segments: Vec<Segment>) {
        if !initial_load
            && segments
                .iter()
                .any(|segment| self.is_segment_outdated(segment))
        {
            debug!("dropping stale segment collection write for env {}", env_id);
            return;
        }
        self.store(DataKey::segments(env_id), StoreItem::Segments(segments));
        if let Some(callback) = &self.callback {
            callback.on_segments_stored(env_id);
        }
    }

    /// Removes a flag from both tiers and notifies the observer, whether or
    /// not the flag was present.
    pub fn delete_flag(&self, identifier: &str) {
        self.discard(DataKey::flag(identifier));
        if let Some(callback) = &self.callback {
            callback.on_flag_deleted(identifier);
        }
    }

    /// Removes a segment from both tiers and notifies the observer, whether
    /// or not the segment was present.
    pub fn delete_segment(&self, identifier: &str) {
        self.discard(DataKey::segment(identifier));
        if let Some(callback) = &self.callback {
            callback.on_segment_deleted(identifier);
        }
    }

    /// Releases repository-owned resources. The injected cache and storage
    /// are externally owned and stay open.
    pub fn close(&self) {}

    fn get_flag_and_cache(&self, identifier: &str, cacheable: bool) -> Result<Flag, Error> {
        let key = DataKey::flag(identifier);
        if let Some(flag) = self.cache.get(&key).and_then(StoreItem::into_flag) {
            return Ok(flag);
        }

        if let Some(storage) = &self.storage {
            if let Some(flag) = storage.get(&key).and_then(StoreItem::into_flag) {
                if cacheable {
                    self.cache.set(key, StoreItem::Flag(flag.clone()));
                }
                return Ok(flag);
            }
        }
        Err(Error::FlagNotFound(identifier.to_string()))
    }

    fn get_segment_and_cache(&self, identifier: &str, cacheable: bool) -> Result<Segment, Error> {
        let key = DataKey::segment(identifier);
        if let Some(segment) = self.cache.get(&key).and_then(StoreItem::into_segment) {
            return Ok(segment);
        }

        if let Some(storage) = &self.storage {
            if let Some(segment) = storage.get(&key).and_then(StoreItem::into_segment) {
                if cacheable {
                    self.cache.set(key, StoreItem::Segment(segment.clone()));
                }
                return Ok(segment);
            }
        }
        Err(Error::SegmentNotFound(identifier.to_string()))
    }

    // Writes to the tier of record. With a durable store configured the key
    // is evicted from the cache so the next read performs an explicit
    // cache-fill; a storage failure is logged and does not abort.
    fn store(&self, key: DataKey, item: StoreItem) {
        match &self.storage {
            Some(storage) => {
                if let Err(e) = storage.set(&key, item) {
                    error!("error while storing {} into the repository: {}", key, e);
                }
                self.cache.remove(&key);
            }
            None => {
                self.cache.set(key, item);
            }
        }
    }

    fn discard(&self, key: DataKey) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove(&key) {
                error!("error while removing {} from the repository: {}", key, e);
            }
        }
        self.cache.remove(&key);
    }

    // The lookup deliberately skips the cache-fill so that checking an
    // incoming write leaves the cache untouched.
    fn is_flag_outdated(&self, incoming: &Flag) -> bool {
        match self.get_flag_and_cache(&incoming.feature, false) {
            Ok(stored) => !incoming.supersedes(&stored),
            Err(_) => false,
        }
    }

    fn is_segment_outdated(&self, incoming: &Segment) -> bool {
        match self.get_segment_and_cache(&incoming.identifier, false) {
            Ok(stored) => !incoming.supersedes(&stored),
            Err(_) => false,
        }
    }
}
