// src/storage/file.rs
use super::StorageBackend;
use crate::core::helpers::sanitize_key;
use crate::core::prelude::*;
use std::path::{Path, PathBuf};

/// One JSON file per key under a namespace directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(AppError::Io)?;
        Ok(Self { dir })
    }

    /// `.solutio/storage` next to the executable, or the temp dir when that
    /// is not writable.
    pub fn with_fallback() -> Self {
        let preferred = crate::core::helpers::get_app_dir().map(|d| d.join("storage"));
        match preferred.and_then(Self::new) {
            Ok(storage) => storage,
            Err(e) => {
                let dir = std::env::temp_dir().join(".solutio").join("storage");
                log::warn!(
                    "Storage directory unavailable ({}), using {}",
                    e,
                    dir.display()
                );
                let _ = std::fs::create_dir_all(&dir);
                Self { dir }
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(AppError::Io)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, value).map_err(AppError::Io)?;
        std::fs::rename(&temp_path, &path).map_err(AppError::Io)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.write("solutio.catalogue", r#"{"items":[]}"#).unwrap();

        let reopened = FileStorage::new(dir.path()).unwrap();
        assert_eq!(
            reopened.read("solutio.catalogue").unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );
        assert!(dir.path().join("solutio.catalogue.json").exists());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert!(storage.remove("nope").is_ok());
        assert_eq!(storage.read("nope").unwrap(), None);
    }

    #[test]
    fn test_keys_cannot_escape_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.write("../outside", "x").unwrap();
        assert!(dir.path().join(".._outside.json").exists());
    }
}
