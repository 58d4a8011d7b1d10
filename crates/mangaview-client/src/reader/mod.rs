//! Chapter reader: state machine, async session and view models.

mod chapter;
mod location;
mod machine;
mod session;
mod state;
mod view;

pub use chapter::open_chapter;
pub use location::ShareableLocation;
pub use machine::{LoadTicket, Reader, Resolution};
pub use session::{ReaderCommand, ReaderSession, SessionEvent};
pub use state::{AttemptToken, ReaderState};
pub use view::{
    page_indicator, Affordance, ChapterErrorView, PageErrorView, PageView, ReaderView,
};
