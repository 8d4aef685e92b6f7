#[macro_export]
macro_rules! impl_default {
    ($type:ty, $body:expr) => {
        impl Default for $type {
            fn default() -> Self {
                $body
            }
        }
    };
}

// Module definitions
pub mod cache;
pub mod catalogue;
pub mod cli;
pub mod core;
pub mod output;
pub mod setup;
pub mod storage;
pub mod translate;
pub mod util;

// Essential re-exports
pub use catalogue::{CatalogueController, CatalogueItem, CatalogueState, ControllerDeps};
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, FetchError, Result};

use crate::cache::{CatalogueCache, TranslationCache};
use crate::catalogue::{ControllerSettings, HttpCatalogueSource};
use crate::core::clock::SystemClock;
use crate::storage::{FileStorage, StorageBackend};
use crate::translate::HttpTranslationService;
use std::sync::Arc;

/// Storage selected by the config: its `dir`, or `.solutio/storage`.
pub fn open_storage(config: &Config) -> Result<Arc<dyn StorageBackend>> {
    let storage = match &config.storage_dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::with_fallback(),
    };
    log::debug!("Storage directory: {}", storage.dir().display());
    Ok(Arc::new(storage))
}

/// Wires the HTTP collaborators, file-backed caches and the controller.
pub fn build_controller(config: &Config) -> Result<Arc<CatalogueController>> {
    let storage = open_storage(config)?;
    let clock = Arc::new(SystemClock);

    Ok(CatalogueController::new(ControllerDeps {
        source: Arc::new(HttpCatalogueSource::new(
            config.catalogue.endpoint.clone(),
            config.catalogue.api_key.clone(),
        )),
        translator: Arc::new(HttpTranslationService::new(
            config.translation.endpoint.clone(),
            config.translation.api_key.clone(),
        )),
        catalogue_cache: Arc::new(CatalogueCache::new(
            storage.clone(),
            clock,
            config.catalogue.cache_ttl,
        )),
        translation_cache: Arc::new(TranslationCache::new(storage)),
        settings: ControllerSettings::from(config),
    }))
}

/// Drives one catalogue query end to end and returns the final state.
pub async fn run_query(
    controller: &CatalogueController,
    args: &cli::CliArgs,
) -> CatalogueState {
    controller.load().await;

    if let Some(language) = &args.language {
        controller.set_language(language).await;
    }
    if let Some(search) = &args.search {
        controller.apply_search_text(search);
    }
    if let Some(category) = &args.category {
        controller.set_category(category);
    }
    if let Some(target) = &args.target {
        controller.set_target(target);
    }
    for _ in 1..args.pages {
        if !controller.load_more() {
            break;
        }
    }

    controller.state()
}

/// Runs one query with an already loaded config and tears the controller down.
pub async fn run_with_config(config: Config, args: cli::CliArgs) -> Result<CatalogueState> {
    let controller = build_controller(&config)?;
    if args.refresh {
        log::info!("Refresh requested, bypassing cached snapshot");
        controller.invalidate_cache();
    }
    let state = run_query(&controller, &args).await;
    controller.shutdown();
    Ok(state)
}
