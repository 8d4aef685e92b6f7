// src/catalogue/model.rs
use serde::{Deserialize, Serialize};

/// One SaaS tool as delivered by the catalogue source.
///
/// Field names follow the camelCase wire format of the source function.
/// Missing collections and strings decode to empty values, missing ratings
/// to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogueItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub description: String,
    pub categories: Vec<String>,
    pub targets: Vec<String>,
    pub score: f64,
    pub automation: f64,
    pub ease: f64,
    pub price_text: String,
    pub features: Vec<String>,
    pub use_cases: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub logo_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_linked: Option<Vec<PricingPlan>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingPlan {
    pub id: String,
    pub plan: String,
    pub price: String,
    pub included: Vec<String>,
    pub popular: bool,
}

impl CatalogueItem {
    /// Minimal item, mostly for tests and fixtures.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

/// Snapshot persisted by the catalogue cache, valid while `now - timestamp < ttl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub items: T,
    /// Epoch milliseconds of the write.
    pub timestamp: i64,
}

impl<T> CacheEntry<T> {
    pub fn new(items: T, timestamp: i64) -> Self {
        Self { items, timestamp }
    }

    pub fn is_valid(&self, now_millis: i64, ttl_millis: i64) -> bool {
        now_millis - self.timestamp < ttl_millis
    }
}

/// Keeps the first occurrence of each id.
pub fn dedup_by_id(items: Vec<CatalogueItem>) -> Vec<CatalogueItem> {
    let mut seen = std::collections::HashSet::new();
    let before = items.len();
    let unique: Vec<CatalogueItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();
    if unique.len() != before {
        log::warn!(
            "Catalogue snapshot contained {} duplicate id(s), kept first occurrences",
            before - unique.len()
        );
    }
    unique
}
