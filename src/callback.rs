use std::sync::Arc;

/// Observer notified on every accepted store and every delete.
///
/// Notifications are fire-and-forget and run synchronously on the writing
/// caller's thread, so implementations must not block for long. Stale
/// writes that were silently dropped never notify.
pub trait Callback: Send + Sync {
    fn on_flag_stored(&self, identifier: &str);

    fn on_flags_stored(&self, env_id: &str);

    fn on_flag_deleted(&self, identifier: &str);

    fn on_segment_stored(&self, identifier: &str);

    fn on_segments_stored(&self, env_id: &str);

    fn on_segment_deleted(&self, identifier: &str);
}

impl<T: Callback + ?Sized> Callback for Arc<T> {
    fn on_flag_stored(&self, identifier: &str) {
        (**self).on_flag_stored(identifier)
    }
    fn on_flags_stored(&self, env_id: &str) {
        (**self).on_flags_stored(env_id)
    }
    fn on_flag_deleted(&self, identifier: &str) {
        (**self).on_flag_deleted(identifier)
    }
    fn on_segment_stored(&self, identifier: &str) {
        (**self).on_segment_stored(identifier)
    }
    fn on_segments_stored(&self, env_id: &str) {
        (**self).on_segments_stored(env_id)
    }
    fn on_segment_deleted(&self, identifier: &str) {
        (**self).on_segment_deleted(identifier)
    }
}
