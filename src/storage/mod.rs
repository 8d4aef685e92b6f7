// src/storage/mod.rs
//! Keyed text blobs that outlive one run, mirroring browser local storage.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::core::prelude::*;

/// Narrow read/write surface the caches persist through.
///
/// Values are JSON text. Implementations report failures; callers decide
/// whether a failure is fatal (the caches never let it be).
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
