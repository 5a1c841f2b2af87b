//! Storage trait definitions.

use crate::error::Result;

/// A persistent string key-value store.
///
/// Writes replace the whole value for a key; there are no partial updates.
pub trait KeyValueStore {
    /// Read the value for `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
