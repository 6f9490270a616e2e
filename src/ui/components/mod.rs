//! Composable UI component renderers.
//!
//! Each component paints one part of the screen into a [`Frame`] and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Breadcrumbs of the open file
//! - [`search`]: Search box with progress indicator
//! - [`results`]: Result list
//! - [`code`]: Highlighted code view
//! - [`empty`]: Centered message when there is nothing to show
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Results | Code | Message]
//! [Border]
//! [Footer]
//! ```

mod code;
mod empty;
mod footer;
mod header;
mod results;
mod search;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use code::render_code;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use results::render_results;
use search::render_search_bar;

/// Renders a horizontal border line at `row`; returns the next row.
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.goto(row, 1);
    frame.push(&Theme::fg(color));
    frame.push(&"─".repeat(cols));
    frame.push(Theme::reset());
    row + 1
}

/// Renders the full layout of one frame.
pub fn render_layout(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(frame, current_row, &vm.search_bar, theme, cols);

    match &vm.body {
        Body::Results(items) => {
            render_results(frame, current_row, items, theme, cols);
        }
        Body::Code(pane) => {
            render_code(frame, current_row, pane, theme);
        }
        Body::Message(empty) => render_empty_state(frame, current_row, empty, theme, cols),
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(frame, border_row, &theme.colors.border, cols);
    render_footer(frame, footer_start, &vm.footer, theme, cols);
}
