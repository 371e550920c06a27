use thiserror::Error;

/// Failure outcomes of table operations. Every variant leaves the table in a
/// valid state; none of them are fatal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum TableError {
    /// Bucket storage could not be grown (or the bucket array allocated).
    #[error("out of memory while growing bucket storage")]
    OutOfMemory,
    /// `add_unique` was called with a key that is already present.
    #[error("key already exists")]
    DuplicateKey,
    /// The key is not present in the table.
    #[error("key not found")]
    NotFound,
}
