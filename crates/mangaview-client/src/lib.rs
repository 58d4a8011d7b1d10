//! # MangaView Client
//!
//! Everything a reader front end needs, independent of how it is drawn:
//!
//! - [`reader`]: the chapter reader. A [`Reader`] owns one chapter's page
//!   set and decides which image URL to load, when to fall back to the
//!   other addressing form, and which late results to drop. A
//!   [`ReaderSession`] drives it against an [`ImageLoader`].
//! - [`navigation`]: maps buttons, arrow keys and swipes to reader commands.
//! - [`listing`]: search result pagination.
//! - [`details`]: the series details view model.
//!
//! [`ImageLoader`]: mangaview_protocols::ImageLoader

pub mod details;
pub mod error;
pub mod listing;
pub mod navigation;
pub mod reader;

pub use details::DetailsView;
pub use error::ReaderError;
pub use listing::{ListingView, PageButton};
pub use navigation::{Key, NavInput, NavigationMapper, DEFAULT_SWIPE_THRESHOLD};
pub use reader::{
    open_chapter, Affordance, ChapterErrorView, LoadTicket, PageErrorView, PageView, Reader,
    ReaderCommand, ReaderSession, ReaderView, Resolution, SessionEvent, ShareableLocation,
};
