pub const APP_TITLE: &str = "SOLUTIO";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_DIR: &str = ".solutio";
pub const CONFIG_FILE: &str = "solutio.toml";
pub const CONFIG_ENV: &str = "SOLUTIO_CONFIG";
pub const CATALOGUE_API_KEY_ENV: &str = "SOLUTIO_CATALOGUE_API_KEY";
pub const TRANSLATION_API_KEY_ENV: &str = "SOLUTIO_TRANSLATION_API_KEY";

pub const CATALOGUE_CACHE_KEY: &str = "solutio.catalogue";
pub const TRANSLATION_CACHE_KEY: &str = "solutio.translations";

pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const DEFAULT_REVEAL_STEP: usize = 12;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const MAX_DEBOUNCE_MS: u64 = 5000;
pub const DEFAULT_SOURCE_LANGUAGE: &str = "FR";

/// Filter value meaning "no filter", alongside the empty string.
pub const FILTER_ALL: &str = "all";
