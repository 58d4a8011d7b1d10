//! The chapter reader state machine.
//!
//! Per page display:
//!
//! ```text
//! Idle ─► Loading(A) ─┬─► Displayed
//!                     └─► Loading(B) ─┬─► Displayed
//!                                     └─► Failed
//! ```
//!
//! `A` is the form selected by the proxy preference, `B` the other one.
//! The reader never performs I/O: every operation that starts a load hands
//! back a [`LoadTicket`], and the host reports the outcome through
//! [`Reader::resolve`].

use tracing::debug;

use mangaview_protocols::{AddressForm, ChapterPageSet, ImageLoadError, LoadedImage};

use super::location::ShareableLocation;
use super::state::{AttemptToken, ReaderState};
use super::view::{page_indicator, PageErrorView, PageView, ReaderView};
use crate::error::ReaderError;

/// A load the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: AttemptToken,
    pub form: AddressForm,
    pub url: String,
    /// Error of the first form, set on the automatic fallback load.
    pub primary_error: Option<ImageLoadError>,
}

impl LoadTicket {
    pub fn page(&self) -> usize {
        self.token.page
    }
}

/// Outcome of applying a load result.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Superseded attempt; nothing changed.
    Stale,
    Displayed {
        page: usize,
        form: AddressForm,
        image: LoadedImage,
    },
    /// The first form failed; the host must perform this load next.
    Fallback(LoadTicket),
    /// Both forms failed.
    Failed(ReaderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageStatus {
    Idle,
    Loading { page: usize, form: AddressForm },
    Displayed { page: usize, form: AddressForm },
    Failed { page: usize, error: ReaderError },
}

/// Reader for one chapter. Owned by a single task and never shared.
#[derive(Debug, Clone)]
pub struct Reader {
    pages: ChapterPageSet,
    state: ReaderState,
    status: PageStatus,
    location: ShareableLocation,
}

impl Reader {
    /// Reader positioned on page 1 with nothing loading yet. The proxy
    /// preference starts from the page set's hint.
    pub fn new(pages: ChapterPageSet, location: ShareableLocation) -> Self {
        let state = ReaderState::new(pages.len(), pages.prefer_proxy());
        Self {
            pages,
            state,
            status: PageStatus::Idle,
            location,
        }
    }

    /// Override the initial proxy preference.
    pub fn with_proxy_preference(mut self, use_proxy: bool) -> Self {
        if self.state.use_proxy_by_default() != use_proxy {
            self.state.flip_preference();
        }
        self
    }

    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    pub fn pages(&self) -> &ChapterPageSet {
        &self.pages
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count()
    }

    pub fn location(&self) -> &ShareableLocation {
        &self.location
    }

    pub fn last_error(&self) -> Option<&ReaderError> {
        match &self.status {
            PageStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Show page `n`. Out of range is a silent no-op. Going to the current
    /// page reruns its load as a new attempt.
    pub fn go_to_page(&mut self, page: usize) -> Option<LoadTicket> {
        if !self.state.contains(page) {
            debug!("Ignoring out-of-range page {} of {}", page, self.page_count());
            return None;
        }

        self.state.set_current_page(page);
        self.location.set_page(page);
        Some(self.start_load(page))
    }

    /// Flip the proxy preference for all later loads and reload the
    /// current page.
    pub fn toggle_loading_method(&mut self) -> LoadTicket {
        self.state.flip_preference();
        debug!(
            "Proxy preference now {}",
            self.state.use_proxy_by_default()
        );
        self.start_load(self.current_page())
    }

    /// Reset the attempt counter for `page`, then go to it.
    pub fn retry_page(&mut self, page: usize) -> Option<LoadTicket> {
        if !self.state.contains(page) {
            return None;
        }
        self.state.reset_attempts(page);
        self.go_to_page(page)
    }

    /// Apply the outcome of a load.
    pub fn resolve(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<LoadedImage, ImageLoadError>,
    ) -> Resolution {
        if !self.state.is_live(&ticket.token) {
            debug!(
                "Discarding stale result for page {} ({})",
                ticket.page(),
                ticket.form
            );
            return Resolution::Stale;
        }

        let page = ticket.page();
        match (outcome, ticket.primary_error) {
            (Ok(image), _) => {
                self.status = PageStatus::Displayed {
                    page,
                    form: ticket.form,
                };
                Resolution::Displayed {
                    page,
                    form: ticket.form,
                    image,
                }
            }
            (Err(error), None) => {
                let form = ticket.form.other();
                debug!(
                    "Page {} failed via {} ({}), retrying via {}",
                    page, ticket.form, error, form
                );
                self.status = PageStatus::Loading { page, form };
                Resolution::Fallback(self.ticket(ticket.token, form, Some(error)))
            }
            (Err(fallback), Some(primary)) => {
                let error = ReaderError::PageFailed {
                    page,
                    primary_form: ticket.form.other(),
                    primary,
                    fallback_form: ticket.form,
                    fallback,
                };
                self.status = PageStatus::Failed {
                    page,
                    error: error.clone(),
                };
                Resolution::Failed(error)
            }
        }
    }

    pub fn view(&self) -> ReaderView {
        let current = self.current_page();
        let page = match &self.status {
            PageStatus::Idle => PageView::Idle,
            PageStatus::Loading { page, form } => PageView::Loading {
                page: *page,
                form: *form,
            },
            PageStatus::Displayed { page, form } => PageView::Displayed {
                page: *page,
                form: *form,
            },
            PageStatus::Failed { page, .. } => {
                PageView::Failed(PageErrorView::new(*page, self.pages.external_fallback_url()))
            }
        };

        ReaderView {
            indicator: page_indicator(current, self.page_count()),
            prev_disabled: current == 1,
            next_disabled: current == self.page_count(),
            page,
            location: self.location.to_string(),
            external_url: self.pages.external_fallback_url().to_string(),
        }
    }

    /// New attempt for `page` with the preferred form.
    fn start_load(&mut self, page: usize) -> LoadTicket {
        let token = self.state.begin_attempt(page);
        let form = AddressForm::preferred(self.state.use_proxy_by_default());
        self.status = PageStatus::Loading { page, form };
        debug!("Loading page {} ({}), attempt {}", page, form, token.attempt);

        self.ticket(token, form, None)
    }

    fn ticket(
        &self,
        token: AttemptToken,
        form: AddressForm,
        primary_error: Option<ImageLoadError>,
    ) -> LoadTicket {
        let url = self
            .pages
            .url(token.page, form)
            .unwrap_or_default()
            .to_string();
        LoadTicket {
            token,
            form,
            url,
            primary_error,
        }
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
