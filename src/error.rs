use thiserror::Error;

/// Errors surfaced by [`Store::store`](crate::Store::store).
///
/// Retrieval failures are deliberately absent: an unknown, consumed, or
/// expired key all collapse into `None`, so a caller cannot distinguish
/// them. Only the log retains the distinction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key already holds a live secret. Overwriting would silently
    /// destroy it, so the insert is refused.
    #[error("key [{key}] already holds a secret")]
    KeyConflict { key: String },

    /// The empty key is the retrieval sentinel; a secret stored under it
    /// could never be read back.
    #[error("key must not be empty")]
    EmptyKey,
}
