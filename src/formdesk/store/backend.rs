use crate::error::Result;

/// Abstract interface for raw key-value storage.
///
/// This trait handles the "where" of persistence (a directory, memory, a
/// browser's local storage), while [`Mirror`](super::mirror::Mirror) handles
/// the "what" (encoding the record list and degrading on failure).
///
/// Methods take `&self`; implementations that need mutation use interior
/// mutability. Everything runs on one thread, one call at a time.
pub trait StorageBackend {
    /// Read the value under `key`.
    /// Returns Ok(None) if nothing was ever written there.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key` in full.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
