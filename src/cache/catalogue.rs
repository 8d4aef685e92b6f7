// src/cache/catalogue.rs
use crate::catalogue::model::{CacheEntry, CatalogueItem};
use crate::core::clock::Clock;
use crate::core::constants::CATALOGUE_CACHE_KEY;
use crate::core::prelude::*;
use crate::storage::StorageBackend;
use std::sync::RwLock;

/// TTL-bounded copy of the last good catalogue snapshot.
///
/// Every storage problem degrades to a miss (read) or a dropped write; none
/// of them reach the caller. The in-memory mirror is always updated on
/// `set`, so a snapshot that could not be persisted still serves this
/// process until it expires.
pub struct CatalogueCache {
    storage: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    mirror: RwLock<Option<CacheEntry<Vec<CatalogueItem>>>>,
}

impl CatalogueCache {
    pub fn new(storage: Arc<dyn StorageBackend>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        let cache = Self {
            storage,
            clock,
            ttl,
            mirror: RwLock::new(None),
        };
        let initial = cache.read_stored();
        *cache.mirror.write().unwrap_or_else(|p| p.into_inner()) = initial;
        cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self) -> Option<Vec<CatalogueItem>> {
        let now = self.clock.now_millis();
        let ttl = self.ttl.as_millis() as i64;

        // The mirror may hold a newer snapshot that failed to persist.
        let entry = match (self.read_stored(), self.mirror()) {
            (Some(stored), Some(mirror)) if stored.timestamp > mirror.timestamp => Some(stored),
            (stored, mirror) => mirror.or(stored),
        };
        match entry {
            Some(entry) if entry.is_valid(now, ttl) => {
                log::debug!(
                    "Catalogue cache hit ({} items, age {}ms)",
                    entry.items.len(),
                    now - entry.timestamp
                );
                Some(entry.items)
            }
            Some(entry) => {
                log::debug!(
                    "Catalogue cache expired (age {}ms), invalidating",
                    now - entry.timestamp
                );
                self.invalidate();
                None
            }
            None => {
                log::debug!("Catalogue cache miss");
                None
            }
        }
    }

    pub fn set(&self, items: &[CatalogueItem]) {
        let entry = CacheEntry::new(items.to_vec(), self.clock.now_millis());

        let serialized = serde_json::to_string(&entry);
        *self.mirror.write().unwrap_or_else(|p| p.into_inner()) = Some(entry);

        let result = serialized
            .map_err(|e| AppError::Storage(format!("Failed to serialize snapshot: {}", e)))
            .and_then(|json| self.storage.write(CATALOGUE_CACHE_KEY, &json));
        if let Err(e) = result {
            log::warn!("Catalogue snapshot not persisted: {}", e);
        }
    }

    /// Current in-memory entry, regardless of age.
    pub fn mirror(&self) -> Option<CacheEntry<Vec<CatalogueItem>>> {
        self.mirror
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn invalidate(&self) {
        *self.mirror.write().unwrap_or_else(|p| p.into_inner()) = None;
        if let Err(e) = self.storage.remove(CATALOGUE_CACHE_KEY) {
            log::warn!("Failed to remove catalogue snapshot: {}", e);
        }
    }

    fn read_stored(&self) -> Option<CacheEntry<Vec<CatalogueItem>>> {
        let raw = match self.storage.read(CATALOGUE_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::debug!("Catalogue cache unreadable, treating as miss: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Discarding corrupt catalogue snapshot: {}", e);
                if let Err(e) = self.storage.remove(CATALOGUE_CACHE_KEY) {
                    log::debug!("Failed to remove corrupt catalogue snapshot: {}", e);
                }
                None
            }
        }
    }
}
