//! Async driver for a [`Reader`].
//!
//! Loads run concurrently in a `FuturesUnordered`; superseded loads are not
//! cancelled, their results are dropped by the reader's token check.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use mangaview_protocols::{AddressForm, ImageLoadError, ImageLoader, LoadedImage};

use super::machine::{LoadTicket, Reader, Resolution};
use crate::error::ReaderError;

/// Commands a front end sends to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderCommand {
    GoToPage(usize),
    Next,
    Previous,
    /// Retry the current page from the preferred form.
    Retry,
    ToggleMethod,
}

/// Observable effect of a command or a finished load.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Loading { page: usize, form: AddressForm },
    Displayed {
        page: usize,
        form: AddressForm,
        image: LoadedImage,
    },
    FellBack {
        page: usize,
        from: AddressForm,
        to: AddressForm,
    },
    Failed { page: usize, error: ReaderError },
    /// A superseded load finished and was ignored.
    Discarded { page: usize },
}

type PendingLoad = BoxFuture<'static, (LoadTicket, Result<LoadedImage, ImageLoadError>)>;

pub struct ReaderSession<L: ?Sized> {
    reader: Reader,
    loader: Arc<L>,
    in_flight: FuturesUnordered<PendingLoad>,
}

impl<L> ReaderSession<L>
where
    L: ImageLoader + ?Sized + 'static,
{
    pub fn new(reader: Reader, loader: Arc<L>) -> Self {
        Self {
            reader,
            loader,
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    /// Loads started and not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Load page 1, then the page named by the location's `page` marker.
    /// An invalid marker leaves the reader on page 1.
    pub fn start(&mut self) -> Vec<SessionEvent> {
        let requested = self.reader.location().requested_page();
        let mut events: Vec<SessionEvent> = self
            .dispatch(ReaderCommand::GoToPage(1))
            .into_iter()
            .collect();

        if let Some(page) = requested.filter(|p| *p != 1) {
            debug!("Location requests page {}", page);
            events.extend(self.dispatch(ReaderCommand::GoToPage(page)));
        }
        events
    }

    /// Apply a command. Returns the load it started, if any.
    pub fn dispatch(&mut self, command: ReaderCommand) -> Option<SessionEvent> {
        let current = self.reader.current_page();
        let ticket = match command {
            ReaderCommand::GoToPage(page) => self.reader.go_to_page(page),
            ReaderCommand::Next => self.reader.go_to_page(current + 1),
            ReaderCommand::Previous => current
                .checked_sub(1)
                .and_then(|page| self.reader.go_to_page(page)),
            ReaderCommand::Retry => self.reader.retry_page(current),
            ReaderCommand::ToggleMethod => Some(self.reader.toggle_loading_method()),
        }?;

        let event = SessionEvent::Loading {
            page: ticket.page(),
            form: ticket.form,
        };
        self.spawn(ticket);
        Some(event)
    }

    /// Wait for the next load to finish and apply it. `None` once nothing
    /// is in flight.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        let (ticket, outcome) = self.in_flight.next().await?;
        Some(self.apply(ticket, outcome))
    }

    /// Apply every in-flight load, including the fallbacks they trigger.
    pub async fn settle(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    /// Event loop. Commands and load completions are applied in arrival
    /// order. Returns once the command channel is closed and every
    /// in-flight load has been applied.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<ReaderCommand>,
        events: mpsc::Sender<SessionEvent>,
    ) -> Reader {
        info!(
            "Reader session started ({} pages)",
            self.reader.page_count()
        );
        for event in self.start() {
            Self::emit(&events, event).await;
        }

        let mut accepting = true;
        loop {
            tokio::select! {
                command = commands.recv(), if accepting => match command {
                    Some(command) => {
                        debug!("Reader command: {:?}", command);
                        if let Some(event) = self.dispatch(command) {
                            Self::emit(&events, event).await;
                        }
                    }
                    None => {
                        debug!("Command channel closed, draining {} loads", self.in_flight.len());
                        accepting = false;
                    }
                },

                Some((ticket, outcome)) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    let event = self.apply(ticket, outcome);
                    Self::emit(&events, event).await;
                }

                else => break,
            }
        }

        info!("Reader session ended on page {}", self.reader.current_page());
        self.reader
    }

    async fn emit(events: &mpsc::Sender<SessionEvent>, event: SessionEvent) {
        if events.send(event).await.is_err() {
            debug!("Session event dropped: receiver closed");
        }
    }

    fn spawn(&mut self, ticket: LoadTicket) {
        let loader = Arc::clone(&self.loader);
        self.in_flight.push(Box::pin(async move {
            let outcome = loader.load(&ticket.url).await;
            (ticket, outcome)
        }));
    }

    fn apply(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<LoadedImage, ImageLoadError>,
    ) -> SessionEvent {
        let page = ticket.page();
        let from = ticket.form;

        match self.reader.resolve(ticket, outcome) {
            Resolution::Stale => SessionEvent::Discarded { page },
            Resolution::Displayed { page, form, image } => {
                SessionEvent::Displayed { page, form, image }
            }
            Resolution::Fallback(next) => {
                let to = next.form;
                self.spawn(next);
                SessionEvent::FellBack { page, from, to }
            }
            Resolution::Failed(error) => {
                warn!("{}", error);
                SessionEvent::Failed { page, error }
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
