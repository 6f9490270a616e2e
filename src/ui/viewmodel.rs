//! View model types representing renderable UI state.
//!
//! View models are computed by `Browser::compute_viewmodel()` from the store
//! state, the render targets and the input focus. They hold display-ready data
//! only: windowed lists, visible code lines and pre-computed highlight ranges.

use crate::ui::highlight::Line;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Breadcrumbs of the open file.
    pub header: HeaderInfo,

    /// Search input with its progress indicator.
    pub search_bar: SearchBarInfo,

    /// Main pane.
    pub body: Body,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// What the main pane shows.
#[derive(Debug, Clone)]
pub enum Body {
    /// Visible window of the result list.
    Results(Vec<DisplayItem>),
    /// Visible window of the code view.
    Code(CodePane),
    /// Centered message (nothing loaded, no matches, fetch failed).
    Message(EmptyState),
}

/// One row of the result list.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Possibly truncated filename.
    pub label: String,

    /// Whether the cursor is on this row.
    pub is_selected: bool,

    /// Character ranges matching the search term, as `(start, end)`.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Visible part of the code view.
#[derive(Debug, Clone)]
pub struct CodePane {
    /// 1-based number of the first line in `lines`.
    pub first_line_number: usize,

    /// Digits needed for the largest line number of the file.
    pub gutter_width: usize,

    /// Highlighted lines in view.
    pub lines: Vec<Line>,

    /// Frame width, for clipping.
    pub width: usize,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Path segments of the open file; empty when none is open.
    pub segments: Vec<String>,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Centered message in place of content.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,

    /// Render in the error color.
    pub is_error: bool,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current input text.
    pub query: String,

    /// Whether keys go to the input.
    pub focused: bool,

    /// Whether a search is in flight.
    pub busy: bool,

    /// Message of the last failed search.
    pub error: Option<String>,
}
