//! In-memory key-value store, used by tests.

use std::collections::HashMap;

use super::traits::KeyValueStore;
use crate::error::{Result, TaskError};

#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key before handing the store over.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent `set`/`remove` fail with a persistence error.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(TaskError::Persistence(format!("write to {:?} refused", key)));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(TaskError::Persistence(format!("remove of {:?} refused", key)));
        }
        self.entries.remove(key);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryKvStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_fail_writes() {
        let mut store = MemoryKvStore::new().with_entry("k", "old");
        store.set_fail_writes(true);
        assert!(matches!(store.set("k", "new"), Err(TaskError::Persistence(_))));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("old"));
        assert_eq!(store.writes(), 0);
    }
}
