// src/cache/translation.rs
use crate::core::constants::TRANSLATION_CACHE_KEY;
use crate::core::prelude::*;
use crate::storage::StorageBackend;
use sha2::{Digest, Sha256};
use std::sync::RwLock;

/// `"<TARGET_LANG>:<hash>"`, stable across runs.
pub fn cache_key(text: &str, target_lang: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let hash: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}:{}", target_lang.trim().to_uppercase(), hash)
}

struct Inner {
    entries: HashMap<String, String>,
    hits: usize,
    misses: usize,
}

/// Per-language memo of single-string translations, without expiry.
///
/// The whole map lives in one storage blob, loaded once and rewritten on
/// every update. Persist failures are logged and dropped.
pub struct TranslationCache {
    storage: Arc<dyn StorageBackend>,
    inner: RwLock<Inner>,
}

impl TranslationCache {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let entries = Self::load(storage.as_ref());
        log::debug!("Translation cache loaded with {} entries", entries.len());
        Self {
            storage,
            inner: RwLock::new(Inner {
                entries,
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn get(&self, text: &str, target_lang: &str) -> Option<String> {
        let key = cache_key(text, target_lang);
        let mut inner = self.inner.write().unwrap_or_else(|p| p.into_inner());
        match inner.entries.get(&key).cloned() {
            Some(value) => {
                inner.hits += 1;
                Some(value)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    pub fn set(&self, text: &str, target_lang: &str, translated: &str) {
        self.set_many(target_lang, std::iter::once((text, translated)));
    }

    /// Upserts a batch and persists once.
    pub fn set_many<'a, I>(&self, target_lang: &str, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let snapshot = {
            let mut inner = self.inner.write().unwrap_or_else(|p| p.into_inner());
            for (text, translated) in pairs {
                inner
                    .entries
                    .insert(cache_key(text, target_lang), translated.to_string());
            }
            serde_json::to_string(&inner.entries)
        };
        self.persist(snapshot);
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (usize, usize) {
        let inner = self.inner.read().unwrap_or_else(|p| p.into_inner());
        (inner.hits, inner.misses)
    }

    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .entries
            .clear();
        if let Err(e) = self.storage.remove(TRANSLATION_CACHE_KEY) {
            log::warn!("Failed to remove translation cache: {}", e);
        }
    }

    fn persist(&self, snapshot: serde_json::Result<String>) {
        let result = snapshot
            .map_err(|e| AppError::Storage(format!("Failed to serialize translations: {}", e)))
            .and_then(|json| self.storage.write(TRANSLATION_CACHE_KEY, &json));
        if let Err(e) = result {
            log::warn!("Translation cache not persisted: {}", e);
        }
    }

    fn load(storage: &dyn StorageBackend) -> HashMap<String, String> {
        match storage.read(TRANSLATION_CACHE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Discarding corrupt translation cache: {}", e);
                HashMap::new()
            }),
            Ok(None) => HashMap::new(),
            Err(e) => {
                log::debug!("Translation cache unreadable, starting empty: {}", e);
                HashMap::new()
            }
        }
    }
}
