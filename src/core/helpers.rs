use crate::core::constants::CONFIG_DIR;
use crate::core::prelude::*;
use std::path::PathBuf;

/// Directory next to the executable, falling back to the working directory.
pub fn get_base_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().map_err(AppError::Io)?;
    match exe_path.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().map_err(AppError::Io),
    }
}

pub fn get_app_dir() -> Result<PathBuf> {
    Ok(get_base_dir()?.join(CONFIG_DIR))
}

/// Keeps storage keys usable as file names.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
