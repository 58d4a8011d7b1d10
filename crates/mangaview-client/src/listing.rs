//! Search result listing and its pagination window.

use serde::Serialize;

use mangaview_protocols::{SearchPage, SeriesSummary};

/// Results per search page.
pub const PAGE_SIZE: u64 = 20;

/// Numbered buttons shown at most.
pub const MAX_BUTTONS: usize = 5;

pub const NO_RESULTS: &str = "No manga found";

pub fn total_pages(total_count: u64) -> usize {
    total_count.div_ceil(PAGE_SIZE) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageButton {
    Prev { target: usize, disabled: bool },
    Page { number: usize, current: bool },
    Ellipsis,
    Next { target: usize, disabled: bool },
}

/// Pagination controls for `current` of `total` pages. Empty when there is
/// only one page.
pub fn pagination(current: usize, total: usize) -> Vec<PageButton> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let mut start = current.saturating_sub(MAX_BUTTONS / 2).max(1);
    let end = (start + MAX_BUTTONS - 1).min(total);
    if end - start + 1 < MAX_BUTTONS {
        start = end.saturating_sub(MAX_BUTTONS - 1).max(1);
    }

    let mut buttons = vec![PageButton::Prev {
        target: current.saturating_sub(1).max(1),
        disabled: current == 1,
    }];

    if start > 1 {
        buttons.push(page_button(1, current));
        if start > 2 {
            buttons.push(PageButton::Ellipsis);
        }
    }
    buttons.extend((start..=end).map(|n| page_button(n, current)));
    if end < total {
        if end < total - 1 {
            buttons.push(PageButton::Ellipsis);
        }
        buttons.push(page_button(total, current));
    }

    buttons.push(PageButton::Next {
        target: (current + 1).min(total),
        disabled: current == total,
    });
    buttons
}

fn page_button(number: usize, current: usize) -> PageButton {
    PageButton::Page {
        number,
        current: number == current,
    }
}

/// What a search results screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListingView {
    Empty { message: &'static str },
    Results {
        items: Vec<SeriesSummary>,
        page: usize,
        total_pages: usize,
        buttons: Vec<PageButton>,
    },
}

impl ListingView {
    pub fn new(results: SearchPage, page: usize) -> Self {
        if results.items.is_empty() {
            return Self::Empty {
                message: NO_RESULTS,
            };
        }
        let total_pages = total_pages(results.total_count);
        Self::Results {
            buttons: pagination(page, total_pages),
            items: results.items,
            page,
            total_pages,
        }
    }
}
