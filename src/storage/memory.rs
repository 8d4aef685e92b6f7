use super::StorageBackend;
use crate::core::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-process storage, with switches to simulate an unavailable or full store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Rejects every write as if the quota were exceeded.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries.contains_key(key)
    }

    /// Puts raw text under `key`, bypassing failure switches.
    pub fn insert_raw(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Storage("storage unavailable".to_string()));
        }
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!(
                "quota exceeded while writing '{}'",
                key
            )));
        }
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("k").unwrap(), None);

        storage.write("k", "{}").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.write_count(), 1);

        storage.remove("k").unwrap();
        assert!(!storage.contains("k"));
    }

    #[test]
    fn test_failure_switches() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        assert!(matches!(storage.write("k", "v"), Err(AppError::Storage(_))));
        assert_eq!(storage.write_count(), 0);

        storage.insert_raw("k", "v");
        storage.set_fail_reads(true);
        assert!(storage.read("k").is_err());
    }
}
