// src/translate/mod.rs
//! Turns a source-language snapshot into a translated display copy.

pub mod service;

pub use service::{HttpTranslationService, TranslationService};

use crate::cache::TranslationCache;
use crate::catalogue::model::CatalogueItem;
use crate::core::prelude::*;
use self::service::check_alignment;
use std::collections::HashSet;

/// Unique translatable strings in first-seen order: names, descriptions,
/// every feature, then the category and target vocabulary.
pub fn collect_translatable(
    items: &[CatalogueItem],
    categories: &[String],
    targets: &[String],
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut texts = Vec::new();
    let mut push = |text: &str| {
        if !text.trim().is_empty() && seen.insert(text.to_string()) {
            texts.push(text.to_string());
        }
    };

    for item in items {
        push(&item.name);
        push(&item.description);
        for feature in &item.features {
            push(feature);
        }
    }
    for tag in categories.iter().chain(targets) {
        push(tag);
    }
    texts
}

/// Source text -> translated text for every entry of `texts`.
///
/// Hits come from the cache; misses go to the service in a single call and
/// are written back. Nothing is sent when everything is cached.
pub async fn resolve(
    cache: &TranslationCache,
    service: &dyn TranslationService,
    texts: &[String],
    target_lang: &str,
) -> Result<HashMap<String, String>> {
    let mut resolved = HashMap::with_capacity(texts.len());
    let mut misses = Vec::new();

    for text in texts {
        match cache.get(text, target_lang) {
            Some(hit) => {
                resolved.insert(text.clone(), hit);
            }
            None => misses.push(text.clone()),
        }
    }

    log::debug!(
        "Translation to {}: {} cached, {} to fetch",
        target_lang,
        resolved.len(),
        misses.len()
    );

    if misses.is_empty() {
        return Ok(resolved);
    }

    let translated = service.translate(&misses, target_lang).await?;
    let translated = check_alignment(misses.len(), translated)?;

    cache.set_many(
        target_lang,
        misses
            .iter()
            .zip(&translated)
            .map(|(source, target)| (source.as_str(), target.as_str())),
    );
    resolved.extend(misses.into_iter().zip(translated));
    Ok(resolved)
}

/// Translated copy of `items`; strings missing from `map` pass through.
pub fn apply(items: &[CatalogueItem], map: &HashMap<String, String>) -> Vec<CatalogueItem> {
    let lookup = |text: &String| map.get(text).cloned().unwrap_or_else(|| text.clone());
    items
        .iter()
        .map(|item| CatalogueItem {
            name: lookup(&item.name),
            description: lookup(&item.description),
            features: item.features.iter().map(&lookup).collect(),
            ..item.clone()
        })
        .collect()
}

/// Display label for each tag, falling back to the tag itself.
pub fn label_map(tags: &[String], map: &HashMap<String, String>) -> HashMap<String, String> {
    tags.iter()
        .map(|tag| {
            let label = map.get(tag).cloned().unwrap_or_else(|| tag.clone());
            (tag.clone(), label)
        })
        .collect()
}

pub fn identity_labels(tags: &[String]) -> HashMap<String, String> {
    tags.iter().map(|tag| (tag.clone(), tag.clone())).collect()
}
