/// In-memory storage backend.
///
/// Used as the fake adapter in tests. Counts writes and removes so callers
/// can assert that a rejected operation never touched storage, and can be
/// switched into a failing mode to exercise the error path.
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::{KeyValueStore, StorageError};

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
    removes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate entries, e.g. data left by an earlier install.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
            ..Self::default()
        }
    }

    /// Current raw value under `key`, bypassing the async interface.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Number of successful removes so far.
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::Relaxed)
    }

    /// While set, every write and remove fails with `StorageError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable("memory store is read-only".into()));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("memory store lock poisoned".into())
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.entries.write().map_err(poisoned)?.remove(key);
        self.removes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_write_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.read("k").await.unwrap(), None);

        store.write("k", "[1]").await.unwrap();
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.write_count(), 1);

        store.remove("k").await.unwrap();
        assert_eq!(store.read("k").await.unwrap(), None);
        // Removing twice is fine.
        store.remove("k").await.unwrap();
        assert_eq!(store.remove_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_writes_leave_entries() {
        let store = MemoryStore::with_entries([("k", "true")]);
        store.set_fail_writes(true);

        assert!(matches!(
            store.write("k", "false").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(store.remove("k").await.is_err());
        assert_eq!(store.get("k").as_deref(), Some("true"));
        assert_eq!(store.write_count(), 0);
    }
}
