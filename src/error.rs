use thiserror::Error;

/// Errors returned by the repository read path.
///
/// Only "data absent" conditions surface here; tier-coordination failures
/// are absorbed and logged (see [crate::StorageError]), and stale-write
/// rejection is a silent no-op rather than an error.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Neither tier holds a flag with this identifier. Callers typically
    /// fall back to a default variation.
    #[error("flag not found with identifier: {0}")]
    FlagNotFound(String),
    /// Neither tier holds a segment with this identifier.
    #[error("segment not found with identifier: {0}")]
    SegmentNotFound(String),
}
