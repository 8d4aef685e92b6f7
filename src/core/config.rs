// src/core/config.rs
use crate::core::api_key::ApiKey;
use crate::core::constants::{
    CATALOGUE_API_KEY_ENV, DEFAULT_CACHE_TTL_SECS, DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE,
    DEFAULT_REVEAL_STEP, DEFAULT_SOURCE_LANGUAGE, MAX_DEBOUNCE_MS, TRANSLATION_API_KEY_ENV,
};
use crate::core::prelude::*;
use log::Level;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// TOML Configuration Structure
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfigToml,
    #[serde(default)]
    catalogue: CatalogueConfigToml,
    #[serde(default)]
    translation: TranslationConfigToml,
    #[serde(default)]
    search: SearchConfigToml,
    #[serde(default)]
    reveal: RevealConfigToml,
    #[serde(default)]
    storage: StorageConfigToml,
}

#[derive(Debug, Deserialize)]
struct GeneralConfigToml {
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct CatalogueConfigToml {
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    api_key: String,
    #[serde(default = "default_cache_ttl")]
    cache_ttl_secs: u64,
}

#[derive(Debug, Deserialize)]
struct TranslationConfigToml {
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    api_key: String,
    #[serde(default = "default_source_language")]
    source_language: String,
}

#[derive(Debug, Deserialize)]
struct SearchConfigToml {
    #[serde(default = "default_debounce")]
    debounce_ms: u64,
}

#[derive(Debug, Deserialize)]
struct RevealConfigToml {
    #[serde(default = "default_page_size")]
    page_size: usize,
    #[serde(default = "default_reveal_step")]
    step: usize,
}

#[derive(Debug, Deserialize, Default)]
struct StorageConfigToml {
    #[serde(default)]
    dir: String,
}

// Default Functions
fn default_log_level() -> String {
    "info".into()
}
fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}
fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.into()
}
fn default_debounce() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_reveal_step() -> usize {
    DEFAULT_REVEAL_STEP
}

crate::impl_default!(
    GeneralConfigToml,
    Self {
        log_level: default_log_level(),
    }
);
crate::impl_default!(
    CatalogueConfigToml,
    Self {
        endpoint: String::new(),
        source: String::new(),
        api_key: String::new(),
        cache_ttl_secs: default_cache_ttl(),
    }
);
crate::impl_default!(
    TranslationConfigToml,
    Self {
        endpoint: String::new(),
        api_key: String::new(),
        source_language: default_source_language(),
    }
);
crate::impl_default!(
    SearchConfigToml,
    Self {
        debounce_ms: default_debounce(),
    }
);
crate::impl_default!(
    RevealConfigToml,
    Self {
        page_size: default_page_size(),
        step: default_reveal_step(),
    }
);

// Main Configuration Structures
#[derive(Clone, Debug)]
pub struct Config {
    config_path: Option<String>,
    /// Messages gathered while loading, replayed by `log_startup`.
    notes: Vec<(Level, String)>,
    pub log_level: String,
    pub catalogue: CatalogueConfig,
    pub translation: TranslationConfig,
    pub search_debounce: Duration,
    pub reveal: RevealConfig,
    pub storage_dir: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct CatalogueConfig {
    pub endpoint: String,
    /// Opaque locator naming the remote table/view to read.
    pub source: String,
    pub api_key: ApiKey,
    pub cache_ttl: Duration,
}

#[derive(Clone, Debug)]
pub struct TranslationConfig {
    pub endpoint: String,
    pub api_key: ApiKey,
    pub source_language: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealConfig {
    pub page_size: usize,
    pub step: usize,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            source: String::new(),
            api_key: ApiKey::empty(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: ApiKey::empty(),
            source_language: DEFAULT_SOURCE_LANGUAGE.into(),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            step: DEFAULT_REVEAL_STEP,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            notes: Vec::new(),
            log_level: default_log_level(),
            catalogue: CatalogueConfig::default(),
            translation: TranslationConfig::default(),
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            reveal: RevealConfig::default(),
            storage_dir: None,
        }
    }
}

impl Config {
    /// First readable config on the search path, or a freshly written default.
    ///
    /// Runs before the logger exists, so nothing is logged here; call
    /// `log_startup` once logging is initialised.
    pub async fn load() -> Result<Self> {
        let mut notes = Vec::new();
        for path in crate::setup::setup_toml::get_config_paths() {
            if path.exists() {
                match Self::from_file(&path).await {
                    Ok(mut config) => {
                        notes.append(&mut config.notes);
                        config.notes = notes;
                        return Ok(config);
                    }
                    Err(e) => notes.push((
                        Level::Warn,
                        format!("Skipping config {}: {}", path.display(), e),
                    )),
                }
            }
        }

        let path = crate::setup::setup_toml::ensure_config_exists().await?;
        let mut config = Self::from_file(&path).await?;
        notes.push((Level::Info, format!("New config: {}", path.display())));
        notes.append(&mut config.notes);
        config.notes = notes;
        Ok(config)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(AppError::Io)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.as_ref().to_string_lossy().into_owned());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| AppError::Config(format!("TOML: {}", e)))?;

        let mut notes = Vec::new();
        let ttl_secs = Self::clamp(
            "catalogue.cache_ttl_secs",
            file.catalogue.cache_ttl_secs,
            1,
            24 * 60 * 60,
            &mut notes,
        );
        let debounce = Self::clamp(
            "search.debounce_ms",
            file.search.debounce_ms,
            0,
            MAX_DEBOUNCE_MS,
            &mut notes,
        );
        let page_size =
            Self::clamp("reveal.page_size", file.reveal.page_size as u64, 1, u64::MAX, &mut notes)
                as usize;
        let step =
            Self::clamp("reveal.step", file.reveal.step as u64, 1, u64::MAX, &mut notes) as usize;

        let source_language = match file.translation.source_language.trim() {
            "" => DEFAULT_SOURCE_LANGUAGE.to_string(),
            lang => lang.to_uppercase(),
        };

        let storage_dir = match file.storage.dir.trim() {
            "" => None,
            dir => Some(PathBuf::from(dir)),
        };

        Ok(Self {
            config_path: None,
            notes,
            log_level: file.general.log_level,
            catalogue: CatalogueConfig {
                endpoint: file.catalogue.endpoint.trim().to_string(),
                source: file.catalogue.source.trim().to_string(),
                api_key: ApiKey::resolve(&file.catalogue.api_key, CATALOGUE_API_KEY_ENV),
                cache_ttl: Duration::from_secs(ttl_secs),
            },
            translation: TranslationConfig {
                endpoint: file.translation.endpoint.trim().to_string(),
                api_key: ApiKey::resolve(&file.translation.api_key, TRANSLATION_API_KEY_ENV),
                source_language,
            },
            search_debounce: Duration::from_millis(debounce),
            reveal: RevealConfig { page_size, step },
            storage_dir,
        })
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    /// Replays what happened while loading, then a one-line summary.
    pub fn log_startup(&self) {
        for (level, message) in &self.notes {
            log::log!(*level, "{}", message);
        }
        log::info!(
            "Config loaded ({}): source_language={}, cache_ttl={}s, page_size={}",
            self.config_path().unwrap_or("<defaults>"),
            self.translation.source_language,
            self.catalogue.cache_ttl.as_secs(),
            self.reveal.page_size
        );
        if self.catalogue.endpoint.is_empty() {
            log::warn!("No catalogue endpoint configured");
        }
    }

    fn clamp(name: &str, value: u64, min: u64, max: u64, notes: &mut Vec<(Level, String)>) -> u64 {
        let clamped = value.clamp(min, max);
        if clamped != value {
            notes.push((
                Level::Warn,
                format!("{} = {} outside [{}, {}], using {}", name, value, min, max, clamped),
            ));
        }
        clamped
    }
}
