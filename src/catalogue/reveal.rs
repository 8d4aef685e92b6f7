// src/catalogue/reveal.rs
use crate::core::constants::{DEFAULT_PAGE_SIZE, DEFAULT_REVEAL_STEP};

/// Infinite-scroll cursor: how many filtered items are shown.
///
/// Grows by `step` up to the filtered total and only shrinks through
/// `reset`, which callers invoke whenever a filter or the language changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    page_size: usize,
    step: usize,
    visible_count: usize,
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_REVEAL_STEP)
    }
}

impl Reveal {
    pub fn new(page_size: usize, step: usize) -> Self {
        Self {
            page_size,
            step: step.max(1),
            visible_count: page_size,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Count actually shown for a filtered list of `total` items.
    pub fn shown(&self, total: usize) -> usize {
        self.visible_count.min(total)
    }

    pub fn reset(&mut self) {
        self.visible_count = self.page_size;
    }

    /// Reveals one more step. Returns `false` when nothing was left to reveal.
    pub fn advance(&mut self, total: usize) -> bool {
        if self.visible_count >= total {
            return false;
        }
        self.visible_count = (self.visible_count + self.step).min(total);
        true
    }

    /// Whether the boundary marker should be watched at all.
    pub fn needs_sentinel(&self, total: usize, loading: bool, has_error: bool) -> bool {
        !loading && !has_error && total > self.visible_count
    }

    pub fn slice<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        &filtered[..self.shown(filtered.len())]
    }
}

/// Receives "the boundary marker at the end of the list became visible".
///
/// Front-ends without a viewport call the equivalent explicit `load_more`.
pub trait SentinelObserver {
    fn sentinel_visible(&self);
}
