// Shared fakes for the integration tests.
#![allow(dead_code)]

use solutio_catalogue::cache::{CatalogueCache, TranslationCache};
use solutio_catalogue::catalogue::{
    CatalogueController, CatalogueItem, CatalogueSource, ControllerDeps, ControllerSettings,
};
use solutio_catalogue::core::clock::ManualClock;
use solutio_catalogue::storage::MemoryStorage;
use solutio_catalogue::translate::TranslationService;
use solutio_catalogue::{AppError, FetchError, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub const START_MILLIS: i64 = 1_700_000_000_000;

/// Catalogue source answering from a queue; the last answer repeats.
pub struct FakeSource {
    responses: Mutex<VecDeque<std::result::Result<Vec<CatalogueItem>, FetchError>>>,
    calls: AtomicUsize,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeSource {
    pub fn with_items(items: Vec<CatalogueItem>) -> Arc<Self> {
        Self::with_responses(vec![Ok(items)])
    }

    pub fn failing(err: FetchError) -> Arc<Self> {
        Self::with_responses(vec![Err(err)])
    }

    pub fn with_responses(
        responses: Vec<std::result::Result<Vec<CatalogueItem>, FetchError>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            gate: Mutex::new(None),
        })
    }

    /// Makes the next fetch wait until the returned `Notify` is signalled.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogueSource for FakeSource {
    async fn fetch(&self, _locator: &str) -> std::result::Result<Vec<CatalogueItem>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // The answer is picked in call order, even if an earlier call is held.
        let response = {
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 {
                responses.pop_front().unwrap()
            } else {
                responses.front().cloned().unwrap()
            }
        };
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        response
    }
}

/// Appends `_<LANG>` to every text. Can be switched to fail.
pub struct FakeTranslator {
    calls: AtomicUsize,
    texts_sent: AtomicUsize,
    fail: AtomicBool,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeTranslator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            texts_sent: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            gate: Mutex::new(None),
        })
    }

    /// Makes the next translation wait until the returned `Notify` is signalled.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    /// Yields until `count` translations have been requested.
    pub async fn wait_for_calls(&self, count: usize) {
        while self.calls() < count {
            tokio::task::yield_now().await;
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn texts_sent(&self) -> usize {
        self.texts_sent.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TranslationService for FakeTranslator {
    async fn translate(&self, texts: &[String], target_lang: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts_sent.fetch_add(texts.len(), Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Translation("quota exhausted".to_string()));
        }
        Ok(texts
            .iter()
            .map(|t| format!("{}_{}", t, target_lang))
            .collect())
    }
}

pub struct Harness {
    pub controller: Arc<CatalogueController>,
    pub source: Arc<FakeSource>,
    pub translator: Arc<FakeTranslator>,
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
    pub catalogue_cache: Arc<CatalogueCache>,
    pub translation_cache: Arc<TranslationCache>,
}

pub fn harness(source: Arc<FakeSource>) -> Harness {
    harness_with_storage(source, Arc::new(MemoryStorage::new()))
}

pub fn harness_with_storage(source: Arc<FakeSource>, storage: Arc<MemoryStorage>) -> Harness {
    let clock = Arc::new(ManualClock::new(START_MILLIS));
    let translator = FakeTranslator::new();
    let catalogue_cache = Arc::new(CatalogueCache::new(
        storage.clone(),
        clock.clone(),
        Duration::from_secs(300),
    ));
    let translation_cache = Arc::new(TranslationCache::new(storage.clone()));

    let controller = CatalogueController::new(ControllerDeps {
        source: source.clone(),
        translator: translator.clone(),
        catalogue_cache: catalogue_cache.clone(),
        translation_cache: translation_cache.clone(),
        settings: ControllerSettings {
            source_locator: "https://airtable.test/appX/tblTools".to_string(),
            source_language: "FR".to_string(),
            ..ControllerSettings::default()
        },
    });

    Harness {
        controller,
        source,
        translator,
        storage,
        clock,
        catalogue_cache,
        translation_cache,
    }
}

/// `count` tools named "Tool 01".. with alternating categories.
pub fn numbered_items(count: usize) -> Vec<CatalogueItem> {
    (1..=count)
        .map(|n| {
            CatalogueItem::new(format!("rec{:02}", n), format!("Tool {:02}", n))
                .with_description(if n % 2 == 0 { "CRM pour PME" } else { "automatisation" })
                .with_categories([if n % 2 == 0 { "CRM" } else { "Automatisation" }])
                .with_targets(["PME"])
        })
        .collect()
}

pub fn zapier_hubspot() -> Vec<CatalogueItem> {
    vec![
        CatalogueItem::new("rec1", "Zapier")
            .with_description("automation")
            .with_categories(["Automatisation"])
            .with_targets(["Freelance"]),
        CatalogueItem::new("rec2", "HubSpot")
            .with_description("CRM")
            .with_categories(["CRM"])
            .with_targets(["PME"]),
    ]
}
