//! Maps raw front-end input to reader commands.

use serde::{Deserialize, Serialize};

use crate::reader::ReaderCommand;

/// Horizontal travel in pixels a swipe needs to turn the page.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Input as the front end observes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavInput {
    PrevButton,
    NextButton,
    Key { key: Key },
    /// Touch start and end x positions.
    Swipe { start_x: f32, end_x: f32 },
    Jump { page: usize },
    Retry,
    ToggleMethod,
}

#[derive(Debug, Clone, Copy)]
pub struct NavigationMapper {
    swipe_threshold: f32,
}

impl Default for NavigationMapper {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl NavigationMapper {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            swipe_threshold: swipe_threshold.abs(),
        }
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.swipe_threshold
    }

    /// `None` for input that does not navigate. Boundary checks happen in
    /// the reader, so `Previous` on page 1 is still returned here.
    pub fn map(&self, input: NavInput) -> Option<ReaderCommand> {
        match input {
            NavInput::PrevButton | NavInput::Key { key: Key::ArrowLeft } => {
                Some(ReaderCommand::Previous)
            }
            NavInput::NextButton | NavInput::Key { key: Key::ArrowRight } => {
                Some(ReaderCommand::Next)
            }
            NavInput::Key { key: Key::Other } => None,
            NavInput::Swipe { start_x, end_x } => self.map_swipe(start_x, end_x),
            NavInput::Jump { page } => Some(ReaderCommand::GoToPage(page)),
            NavInput::Retry => Some(ReaderCommand::Retry),
            NavInput::ToggleMethod => Some(ReaderCommand::ToggleMethod),
        }
    }

    // Swiping left (finger moves toward smaller x) advances.
    fn map_swipe(&self, start_x: f32, end_x: f32) -> Option<ReaderCommand> {
        if end_x < start_x - self.swipe_threshold {
            Some(ReaderCommand::Next)
        } else if end_x > start_x + self.swipe_threshold {
            Some(ReaderCommand::Previous)
        } else {
            None
        }
    }
}
