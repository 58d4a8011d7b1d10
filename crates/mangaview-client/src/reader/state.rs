//! Mutable reader state: current page, addressing preference and per-page
//! attempt bookkeeping.

use std::collections::HashMap;

/// Identity of one load attempt for one page.
///
/// A resolution is applied only while its token is still the page's latest
/// attempt. The generation changes whenever the page's counter is reset, so
/// a token issued before a reset never matches one issued after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptToken {
    pub page: usize,
    pub generation: u32,
    pub attempt: u32,
}

#[derive(Debug, Clone, Copy, Default)]
struct PageAttempts {
    counter: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
pub struct ReaderState {
    current_page: usize,
    page_count: usize,
    use_proxy_by_default: bool,
    attempts: HashMap<usize, PageAttempts>,
}

impl ReaderState {
    /// Fresh state positioned on page 1. `page_count` is at least 1.
    pub fn new(page_count: usize, use_proxy_by_default: bool) -> Self {
        Self {
            current_page: 1,
            page_count,
            use_proxy_by_default,
            attempts: HashMap::new(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn use_proxy_by_default(&self) -> bool {
        self.use_proxy_by_default
    }

    pub fn contains(&self, page: usize) -> bool {
        (1..=self.page_count).contains(&page)
    }

    pub fn attempt_counter(&self, page: usize) -> u32 {
        self.attempts.get(&page).map_or(0, |a| a.counter)
    }

    pub(crate) fn set_current_page(&mut self, page: usize) {
        debug_assert!(self.contains(page));
        self.current_page = page;
    }

    pub(crate) fn flip_preference(&mut self) {
        self.use_proxy_by_default = !self.use_proxy_by_default;
    }

    /// Count a new attempt for `page` and return its token.
    pub(crate) fn begin_attempt(&mut self, page: usize) -> AttemptToken {
        let entry = self.attempts.entry(page).or_default();
        entry.counter += 1;
        AttemptToken {
            page,
            generation: entry.generation,
            attempt: entry.counter,
        }
    }

    pub(crate) fn reset_attempts(&mut self, page: usize) {
        let entry = self.attempts.entry(page).or_default();
        entry.counter = 0;
        entry.generation += 1;
    }

    /// Whether a resolution carrying `token` may still be applied.
    pub fn is_live(&self, token: &AttemptToken) -> bool {
        token.page == self.current_page
            && self
                .attempts
                .get(&token.page)
                .is_some_and(|a| a.counter == token.attempt && a.generation == token.generation)
    }
}
