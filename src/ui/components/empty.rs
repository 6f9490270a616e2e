//! Empty state component: a centered message in place of content.

use crate::ui::helpers::{clip, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message two rows below `row`, subtitle underneath.
///
/// ```text
/// [blank]
/// [blank]
///        No matching files
///     Keep typing or press Esc
/// ```
///
/// Errors use `error_fg` for the message; otherwise `breadcrumb_fg`.
pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.breadcrumb_fg
    };

    centered(frame, row + 2, &empty.message, &Theme::fg(color), cols);
    centered(
        frame,
        row + 3,
        &empty.subtitle,
        &format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
        cols,
    );
}

fn centered(frame: &mut Frame, row: usize, text: &str, style: &str, cols: usize) {
    let text = clip(text, cols);
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;

    frame.goto(row, 1);
    frame.push(style);
    frame.pad(padding);
    frame.push(text);
    frame.pad(cols.saturating_sub(padding + len));
    frame.push(Theme::reset());
}
