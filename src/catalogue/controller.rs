// src/catalogue/controller.rs
use crate::cache::{CatalogueCache, TranslationCache};
use crate::catalogue::filter::{apply_filters, vocabulary, FilterState};
use crate::catalogue::model::{dedup_by_id, CatalogueItem};
use crate::catalogue::reveal::{Reveal, SentinelObserver};
use crate::catalogue::source::CatalogueSource;
use crate::core::constants::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE, DEFAULT_REVEAL_STEP, DEFAULT_SOURCE_LANGUAGE,
};
use crate::core::prelude::*;
use crate::translate::{self, TranslationService};
use crate::util::Debouncer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub source_locator: String,
    pub source_language: String,
    pub search_debounce: Duration,
    pub page_size: usize,
    pub reveal_step: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            source_locator: String::new(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            page_size: DEFAULT_PAGE_SIZE,
            reveal_step: DEFAULT_REVEAL_STEP,
        }
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            source_locator: config.catalogue.source.clone(),
            source_language: config.translation.source_language.clone(),
            search_debounce: config.search_debounce,
            page_size: config.reveal.page_size,
            reveal_step: config.reveal.step,
        }
    }
}

pub struct ControllerDeps {
    pub source: Arc<dyn CatalogueSource>,
    pub translator: Arc<dyn TranslationService>,
    pub catalogue_cache: Arc<CatalogueCache>,
    pub translation_cache: Arc<TranslationCache>,
    pub settings: ControllerSettings,
}

/// Everything a front-end needs to render the catalogue page.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueState {
    pub loading: bool,
    /// Alert text after a failed primary fetch.
    pub error: Option<String>,
    pub source_language: String,
    pub filters: FilterState,
    /// Search text as typed, before the debounce window elapsed.
    pub pending_search_text: String,
    pub categories: Vec<String>,
    pub targets: Vec<String>,
    pub category_labels: HashMap<String, String>,
    pub target_labels: HashMap<String, String>,
    pub total_items: usize,
    pub total_filtered: usize,
    pub visible_count: usize,
    pub visible: Vec<CatalogueItem>,
    pub wants_sentinel: bool,
    pub recovery_used: bool,
}

impl CatalogueState {
    /// Filters legitimately matched nothing (distinct from the error state).
    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.error.is_none() && self.total_filtered == 0
    }

    pub fn category_label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.category_labels.get(tag).map(String::as_str).unwrap_or(tag)
    }

    pub fn target_label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.target_labels.get(tag).map(String::as_str).unwrap_or(tag)
    }
}

struct Model {
    locator: String,
    canonical: Arc<Vec<CatalogueItem>>,
    display: Arc<Vec<CatalogueItem>>,
    categories: Vec<String>,
    targets: Vec<String>,
    category_labels: HashMap<String, String>,
    target_labels: HashMap<String, String>,
    filters: FilterState,
    pending_search: String,
    reveal: Reveal,
    loading: bool,
    error: Option<String>,
    load_generation: u64,
    translate_generation: u64,
}

impl Model {
    fn set_display(&mut self, display: Arc<Vec<CatalogueItem>>) {
        let (categories, targets) = vocabulary(&display);
        self.display = display;
        self.categories = categories;
        self.targets = targets;
    }

    fn install_canonical(&mut self, items: Vec<CatalogueItem>) {
        let canonical = Arc::new(items);
        self.canonical = canonical.clone();
        self.set_display(canonical);
        self.category_labels = translate::identity_labels(&self.categories);
        self.target_labels = translate::identity_labels(&self.targets);
    }

    fn clear_snapshots(&mut self) {
        self.canonical = Arc::new(Vec::new());
        self.set_display(Arc::new(Vec::new()));
        self.category_labels.clear();
        self.target_labels.clear();
    }

    fn total_filtered(&self) -> usize {
        apply_filters(&self.display, &self.filters).len()
    }
}

/// Orchestrates cache, remote fetch, translation, filtering and reveal.
///
/// State changes are published through a `watch` channel; `state()` reads
/// the same value synchronously. Async operations re-check, when they
/// resolve, that they are still the latest request of their kind and that
/// the controller has not been shut down; stale results are dropped.
pub struct CatalogueController {
    source: Arc<dyn CatalogueSource>,
    translator: Arc<dyn TranslationService>,
    catalogue_cache: Arc<CatalogueCache>,
    translation_cache: Arc<TranslationCache>,
    source_language: String,
    model: RwLock<Model>,
    state_tx: watch::Sender<CatalogueState>,
    search: Debouncer<String>,
    recovery_used: AtomicBool,
    shutdown: CancellationToken,
    self_ref: Weak<CatalogueController>,
}

impl CatalogueController {
    /// Must be called from within a tokio runtime (the search debouncer runs
    /// on its own task).
    pub fn new(deps: ControllerDeps) -> Arc<Self> {
        let settings = deps.settings;
        let source_language = normalize_language(&settings.source_language);

        Arc::new_cyclic(|weak: &Weak<CatalogueController>| {
            let target = weak.clone();
            let search = Debouncer::spawn(settings.search_debounce, move |text: String| {
                if let Some(controller) = target.upgrade() {
                    controller.apply_search_text(&text);
                }
            });

            let model = Model {
                locator: settings.source_locator.clone(),
                canonical: Arc::new(Vec::new()),
                display: Arc::new(Vec::new()),
                categories: Vec::new(),
                targets: Vec::new(),
                category_labels: HashMap::new(),
                target_labels: HashMap::new(),
                filters: FilterState {
                    language: source_language.clone(),
                    ..FilterState::default()
                },
                pending_search: String::new(),
                reveal: Reveal::new(settings.page_size, settings.reveal_step),
                loading: false,
                error: None,
                load_generation: 0,
                translate_generation: 0,
            };

            let initial = derive_state(&model, &source_language, false);
            let (state_tx, _) = watch::channel(initial);

            Self {
                source: deps.source,
                translator: deps.translator,
                catalogue_cache: deps.catalogue_cache,
                translation_cache: deps.translation_cache,
                source_language,
                model: RwLock::new(model),
                state_tx,
                search,
                recovery_used: AtomicBool::new(false),
                shutdown: CancellationToken::new(),
                self_ref: weak.clone(),
            }
        })
    }

    pub fn state(&self) -> CatalogueState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogueState> {
        self.state_tx.subscribe()
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn find_item(&self, id: &str) -> Option<CatalogueItem> {
        self.read(|m| m.display.iter().find(|item| item.id == id).cloned())
    }

    // ---------------------------------------------------------------
    // Load & recovery
    // ---------------------------------------------------------------

    /// Cache first; the data source is only asked on a miss.
    pub async fn load(&self) {
        if let Some(items) = self.catalogue_cache.get() {
            log::info!("Catalogue served from cache ({} items)", items.len());
            self.update(|m| {
                m.load_generation += 1;
                m.loading = false;
                m.error = None;
                m.install_canonical(items);
            });
            self.translate_if_needed().await;
            return;
        }

        let (generation, locator) = self.update(|m| {
            m.load_generation += 1;
            m.loading = true;
            m.error = None;
            (m.load_generation, m.locator.clone())
        });

        let result = self.source.fetch(&locator).await;
        if !self.is_active() {
            return;
        }

        let result = result.map(dedup_by_id);
        let installed = self.update(|m| {
            if m.load_generation != generation {
                log::debug!("Discarding superseded catalogue load #{}", generation);
                return false;
            }
            m.loading = false;
            match result {
                Ok(items) => {
                    log::info!("Catalogue loaded from source ({} items)", items.len());
                    self.catalogue_cache.set(&items);
                    m.install_canonical(items);
                    true
                }
                Err(e) => {
                    log::error!("Catalogue fetch failed: {}", e);
                    m.error = Some(e.user_message());
                    m.clear_snapshots();
                    false
                }
            }
        });

        if installed {
            self.translate_if_needed().await;
        }
    }

    /// Drops the persisted snapshot so the next `load` goes to the source.
    pub fn invalidate_cache(&self) {
        self.catalogue_cache.invalidate();
    }

    /// Points the controller at another remote table and reloads. The
    /// cached snapshot belongs to the previous table, so it is dropped.
    pub async fn set_source_locator(&self, locator: &str) {
        let changed = self.update(|m| {
            if m.locator == locator {
                return false;
            }
            m.locator = locator.to_string();
            true
        });
        if changed {
            self.catalogue_cache.invalidate();
            self.load().await;
        }
    }

    /// Handle for rendering components that notice a broken logo.
    pub fn asset_failure_handle(&self) -> AssetFailureHandle {
        AssetFailureHandle {
            controller: self.self_ref.clone(),
        }
    }

    /// First call per session re-fetches bypassing the cache; later calls are
    /// ignored. Returns whether a recovery fetch ran.
    pub async fn on_asset_load_failure(&self) -> bool {
        if self.recovery_used.swap(true, Ordering::SeqCst) {
            log::debug!("Asset failure ignored, recovery already attempted");
            return false;
        }

        log::info!("Logo failed to load, refreshing catalogue once");
        let (generation, locator) = self.read(|m| (m.load_generation, m.locator.clone()));

        let result = self.source.fetch(&locator).await;
        if !self.is_active() {
            return true;
        }

        let items = match result {
            Ok(items) => dedup_by_id(items),
            Err(e) => {
                log::warn!("Catalogue recovery fetch failed: {}", e);
                self.publish();
                return true;
            }
        };

        let installed = self.update(|m| {
            if m.load_generation != generation {
                log::debug!("Recovery result superseded by a newer load");
                return false;
            }
            self.catalogue_cache.set(&items);
            m.error = None;
            m.install_canonical(items);
            true
        });

        if installed {
            self.translate_if_needed().await;
        }
        true
    }

    // ---------------------------------------------------------------
    // Language
    // ---------------------------------------------------------------

    pub async fn set_language(&self, language: &str) {
        let language = normalize_language(language);
        let changed = self.update(|m| {
            if m.filters.language == language {
                return false;
            }
            m.filters.language = language.clone();
            m.reveal.reset();
            true
        });
        if changed {
            log::debug!("Language switched to {}", language);
            self.translate_if_needed().await;
        }
    }

    /// Rebuilds the display snapshot for the active language.
    async fn translate_if_needed(&self) {
        let (generation, language, canonical, categories, targets) = self.update(|m| {
            m.translate_generation += 1;
            if m.filters.language == self.source_language {
                let canonical = m.canonical.clone();
                m.set_display(canonical);
                m.category_labels = translate::identity_labels(&m.categories);
                m.target_labels = translate::identity_labels(&m.targets);
            }
            (
                m.translate_generation,
                m.filters.language.clone(),
                m.canonical.clone(),
                m.categories.clone(),
                m.targets.clone(),
            )
        });

        if language == self.source_language || canonical.is_empty() {
            return;
        }

        let texts = translate::collect_translatable(&canonical, &categories, &targets);
        let result = translate::resolve(
            &self.translation_cache,
            self.translator.as_ref(),
            &texts,
            &language,
        )
        .await;

        if !self.is_active() {
            return;
        }

        self.update(|m| {
            if m.translate_generation != generation || m.filters.language != language {
                log::debug!("Discarding stale translation to {}", language);
                return;
            }
            match result {
                Ok(map) => {
                    let translated = translate::apply(&m.canonical, &map);
                    m.set_display(Arc::new(translated));
                    m.category_labels = translate::label_map(&m.categories, &map);
                    m.target_labels = translate::label_map(&m.targets, &map);
                }
                Err(e) => {
                    log::warn!(
                        "Translation to {} failed, keeping previous display: {}",
                        language,
                        e
                    );
                    m.category_labels.clear();
                    m.target_labels.clear();
                }
            }
        });
    }

    // ---------------------------------------------------------------
    // Filters & reveal
    // ---------------------------------------------------------------

    /// Raw keystrokes; the filter follows once the input has been quiet for
    /// the debounce window.
    pub fn set_search_text(&self, text: &str) {
        self.update(|m| m.pending_search = text.to_string());
        self.search.push(text.to_string());
    }

    /// Applies a (debounced) search text immediately.
    pub fn apply_search_text(&self, text: &str) {
        self.update(|m| {
            m.pending_search = text.to_string();
            if m.filters.search_text != text {
                m.filters.search_text = text.to_string();
                m.reveal.reset();
            }
        });
    }

    pub fn set_category(&self, category: &str) {
        self.update(|m| {
            if m.filters.selected_category != category {
                m.filters.selected_category = category.to_string();
                m.reveal.reset();
            }
        });
    }

    pub fn set_target(&self, target: &str) {
        self.update(|m| {
            if m.filters.selected_target != target {
                m.filters.selected_target = target.to_string();
                m.reveal.reset();
            }
        });
    }

    /// Reveals the next step of results. No-op while loading, in error, or
    /// once everything is visible.
    pub fn load_more(&self) -> bool {
        let mut model = self.model.write().unwrap_or_else(|p| p.into_inner());
        let total = model.total_filtered();
        if !model
            .reveal
            .needs_sentinel(total, model.loading, model.error.is_some())
        {
            return false;
        }
        let grown = model.reveal.advance(total);
        if grown {
            self.state_tx
                .send_replace(derive_state(&model, &self.source_language, self.recovery_flag()));
        }
        grown
    }

    /// Stops applying results of operations still in flight.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_active(&self) -> bool {
        !self.shutdown.is_cancelled()
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    fn recovery_flag(&self) -> bool {
        self.recovery_used.load(Ordering::SeqCst)
    }

    fn read<R>(&self, f: impl FnOnce(&Model) -> R) -> R {
        let model = self.model.read().unwrap_or_else(|p| p.into_inner());
        f(&model)
    }

    /// Mutates the model and publishes the derived state under the same lock,
    /// so subscribers observe transitions in order.
    fn update<R>(&self, f: impl FnOnce(&mut Model) -> R) -> R {
        let mut model = self.model.write().unwrap_or_else(|p| p.into_inner());
        let result = f(&mut model);
        self.state_tx
            .send_replace(derive_state(&model, &self.source_language, self.recovery_flag()));
        result
    }

    fn publish(&self) {
        self.update(|_| ());
    }
}

impl SentinelObserver for CatalogueController {
    fn sentinel_visible(&self) {
        self.load_more();
    }
}

impl Drop for CatalogueController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Cloneable, fire-and-forget reporter of broken logo images.
#[derive(Clone)]
pub struct AssetFailureHandle {
    controller: Weak<CatalogueController>,
}

impl AssetFailureHandle {
    /// Schedules the one-shot recovery. Returns the task when one was
    /// spawned; `None` once recovery was used or the controller is gone.
    pub fn report(&self) -> Option<JoinHandle<()>> {
        let controller = self.controller.upgrade()?;
        if controller.recovery_flag() {
            return None;
        }
        Some(tokio::spawn(async move {
            controller.on_asset_load_failure().await;
        }))
    }
}

fn normalize_language(language: &str) -> String {
    match language.trim() {
        "" => DEFAULT_SOURCE_LANGUAGE.to_string(),
        lang => lang.to_uppercase(),
    }
}

fn derive_state(model: &Model, source_language: &str, recovery_used: bool) -> CatalogueState {
    let filtered = apply_filters(&model.display, &model.filters);
    let total_filtered = filtered.len();
    let visible: Vec<CatalogueItem> = model
        .reveal
        .slice(&filtered)
        .iter()
        .map(|item| (*item).clone())
        .collect();

    CatalogueState {
        loading: model.loading,
        error: model.error.clone(),
        source_language: source_language.to_string(),
        filters: model.filters.clone(),
        pending_search_text: model.pending_search.clone(),
        categories: model.categories.clone(),
        targets: model.targets.clone(),
        category_labels: model.category_labels.clone(),
        target_labels: model.target_labels.clone(),
        total_items: model.display.len(),
        total_filtered,
        visible_count: visible.len(),
        visible,
        wants_sentinel: model.reveal.needs_sentinel(
            total_filtered,
            model.loading,
            model.error.is_some(),
        ),
        recovery_used,
    }
}
