// src/catalogue/filter.rs
use crate::catalogue::model::CatalogueItem;
use crate::core::constants::{DEFAULT_SOURCE_LANGUAGE, FILTER_ALL};
use std::collections::BTreeSet;

/// Inputs of the filter surface. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Debounced search text, the value the filter actually uses.
    pub search_text: String,
    pub selected_category: String,
    pub selected_target: String,
    pub language: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_category: String::new(),
            selected_target: String::new(),
            language: DEFAULT_SOURCE_LANGUAGE.to_string(),
        }
    }
}

/// `""` and `"all"` both mean "no filter".
pub fn is_unfiltered(selection: &str) -> bool {
    let selection = selection.trim();
    selection.is_empty() || selection.eq_ignore_ascii_case(FILTER_ALL)
}

pub fn matches(item: &CatalogueItem, filters: &FilterState) -> bool {
    let needle = filters.search_text.to_lowercase();
    let search_ok = needle.is_empty()
        || item.name.to_lowercase().contains(&needle)
        || item.description.to_lowercase().contains(&needle);

    let category_ok = is_unfiltered(&filters.selected_category)
        || item
            .categories
            .iter()
            .any(|c| c == filters.selected_category.trim());

    let target_ok = is_unfiltered(&filters.selected_target)
        || item
            .targets
            .iter()
            .any(|t| t == filters.selected_target.trim());

    search_ok && category_ok && target_ok
}

/// Items passing every filter, in snapshot order.
pub fn apply_filters<'a>(items: &'a [CatalogueItem], filters: &FilterState) -> Vec<&'a CatalogueItem> {
    items.iter().filter(|item| matches(item, filters)).collect()
}

/// Selectable categories and targets: deduplicated, lexicographically sorted.
pub fn vocabulary(items: &[CatalogueItem]) -> (Vec<String>, Vec<String>) {
    let categories: BTreeSet<&str> = items
        .iter()
        .flat_map(|item| item.categories.iter().map(String::as_str))
        .filter(|c| !c.trim().is_empty())
        .collect();
    let targets: BTreeSet<&str> = items
        .iter()
        .flat_map(|item| item.targets.iter().map(String::as_str))
        .filter(|t| !t.trim().is_empty())
        .collect();

    (
        categories.into_iter().map(str::to_string).collect(),
        targets.into_iter().map(str::to_string).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Vec<CatalogueItem> {
        vec![
            CatalogueItem::new("1", "Zapier")
                .with_description("automation")
                .with_categories(["Automatisation"])
                .with_targets(["PME", "Freelance"]),
            CatalogueItem::new("2", "HubSpot")
                .with_description("CRM")
                .with_categories(["CRM", "Marketing"])
                .with_targets(["PME"]),
        ]
    }

    fn search(text: &str) -> FilterState {
        FilterState {
            search_text: text.to_string(),
            ..FilterState::default()
        }
    }

    #[test]
    fn test_search_matches_name_or_description_case_insensitive() {
        let items = catalogue();
        let names = |f: &FilterState| -> Vec<String> {
            apply_filters(&items, f).iter().map(|i| i.name.clone()).collect()
        };

        assert_eq!(names(&search("automat")), vec!["Zapier"]);
        assert_eq!(names(&search("HUBS")), vec!["HubSpot"]);
        assert_eq!(names(&search("crm")), vec!["HubSpot"]);
        assert_eq!(names(&search("")).len(), 2);
        assert!(names(&search("nothing like this")).is_empty());
        // Plain substring match: surrounding whitespace is part of the needle.
        assert!(names(&search("crm ")).is_empty());
    }

    #[test]
    fn test_all_sentinel_equals_empty_selection() {
        let items = catalogue();
        let all = FilterState {
            selected_category: "all".into(),
            selected_target: "ALL".into(),
            ..FilterState::default()
        };
        assert_eq!(
            apply_filters(&items, &all),
            apply_filters(&items, &FilterState::default())
        );
    }

    #[test]
    fn test_category_and_target_membership() {
        let items = catalogue();
        let crm = FilterState {
            selected_category: "CRM".into(),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&items, &crm)[0].id, "2");

        let freelance = FilterState {
            selected_target: "Freelance".into(),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&items, &freelance)[0].id, "1");

        let none = FilterState {
            selected_category: "CRM".into(),
            selected_target: "Freelance".into(),
            ..FilterState::default()
        };
        assert!(apply_filters(&items, &none).is_empty());
    }

    #[test]
    fn test_vocabulary_is_sorted_union() {
        let (categories, targets) = vocabulary(&catalogue());
        assert_eq!(categories, vec!["Automatisation", "CRM", "Marketing"]);
        assert_eq!(targets, vec!["Freelance", "PME"]);
    }
}
