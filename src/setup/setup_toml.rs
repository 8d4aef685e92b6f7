// =====================================================
// FILE: src/setup/setup_toml.rs - DEFAULT CONFIG + LOOKUP PATHS
// =====================================================

use crate::core::constants::{CONFIG_DIR, CONFIG_ENV, CONFIG_FILE};
use crate::core::prelude::*;
use std::path::PathBuf;
use tokio::fs;

const DEFAULT_CONFIG: &str = r#"[general]
# error | warn | info | debug | trace (RUST_LOG overrides)
log_level = "info"

[catalogue]
# Function that proxies the catalogue table, called as GET <endpoint>?source=<source>
endpoint = ""
# Opaque locator of the remote table/view
source = ""
# SOLUTIO_CATALOGUE_API_KEY overrides this value
api_key = ""
# Snapshot lifetime in seconds (default 5 minutes)
cache_ttl_secs = 300

[translation]
# Function that batch-translates, called as POST <endpoint> {texts, target_lang}
endpoint = ""
# SOLUTIO_TRANSLATION_API_KEY overrides this value
api_key = ""
# Language the catalogue is authored in
source_language = "FR"

[search]
# Quiet period before the search text is applied
debounce_ms = 300

[reveal]
page_size = 12
step = 12

[storage]
# Empty = .solutio/storage next to the executable
dir = ""
"#;

pub async fn ensure_config_exists() -> Result<PathBuf> {
    let config_dir = crate::core::helpers::get_app_dir()?;
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .await
            .map_err(AppError::Io)?;
        log::debug!("Config directory created: {}", config_dir.display());
    }

    let config_path = config_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)
            .await
            .map_err(AppError::Io)?;
        log::info!("Default config written: {}", config_path.display());
    }

    Ok(config_path)
}

pub fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        if !explicit.trim().is_empty() {
            paths.push(PathBuf::from(explicit.trim()));
        }
    }
    paths.push(PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(base_dir) = exe_path.parent() {
            paths.push(base_dir.join(CONFIG_DIR).join(CONFIG_FILE));
            paths.push(base_dir.join(CONFIG_FILE));
        }
    }
    paths
}
