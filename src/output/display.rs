// src/output/display.rs
use crate::catalogue::{CatalogueItem, CatalogueState};
use std::fmt::Write as _;

const DESCRIPTION_WIDTH: usize = 90;

/// Plain-text rendering of the catalogue page for the terminal.
pub fn render_state(state: &CatalogueState) -> String {
    let mut out = String::new();

    if state.loading {
        out.push_str("Loading catalogue...\n");
        return out;
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "[ERROR] {}", error);
        return out;
    }

    if state.is_empty_result() {
        out.push_str("No tool matches the current filters.\n");
        return out;
    }

    for (index, item) in state.visible.iter().enumerate() {
        out.push_str(&render_item(index + 1, item, state));
    }

    let _ = writeln!(
        out,
        "\nShowing {} of {} result(s) ({} in catalogue, language {})",
        state.visible_count,
        state.total_filtered,
        state.total_items,
        state.filters.language
    );
    if state.wants_sentinel {
        out.push_str("More results available, use --pages to reveal them.\n");
    }
    out
}

fn render_item(position: usize, item: &CatalogueItem, state: &CatalogueState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>3}. {}  [score {:.1}]", position, item.name, item.score);

    if !item.description.is_empty() {
        let _ = writeln!(out, "     {}", truncate(&item.description, DESCRIPTION_WIDTH));
    }

    let categories: Vec<&str> = item
        .categories
        .iter()
        .map(|c| state.category_label(c))
        .collect();
    let targets: Vec<&str> = item
        .targets
        .iter()
        .map(|t| state.target_label(t))
        .collect();
    if !categories.is_empty() || !targets.is_empty() {
        let _ = writeln!(
            out,
            "     {} | {}",
            categories.join(", "),
            targets.join(", ")
        );
    }

    if !item.price_text.is_empty() {
        let _ = writeln!(out, "     {}", item.price_text);
    }
    if let Some(url) = item.affiliate.as_ref().or(item.website.as_ref()) {
        let _ = writeln!(out, "     {}", url);
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
