//! Input focus of the browser.
//!
//! The focus decides how keys are interpreted and which pane the body of the
//! screen shows:
//!
//! - **Search**: keys edit the search term; results show below when present
//! - **Results**: keys move through the result list
//! - **Code**: keys scroll the code view

/// Which part of the UI receives keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Typing into the search bar.
    #[default]
    Search,

    /// Navigating the result list. `Enter` opens the selected file.
    Results,

    /// Reading the code view. Results stay hidden until search is focused
    /// again.
    Code,
}

impl InputMode {
    /// Returns `true` if keys edit the search term.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search)
    }
}
