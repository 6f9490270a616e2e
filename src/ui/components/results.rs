//! Result list component.
//!
//! Renders one search hit per row with selection and fuzzy match
//! highlighting. Labels arrive already truncated by the result effect.

use crate::ui::helpers::{self, clip, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders all rows starting at `row`; returns the next free row.
pub fn render_results(frame: &mut Frame, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_result_row(frame, current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row, padded to the full width so the selection background
/// covers the line.
///
/// ```text
/// ▸ pkg/index/search.go
///   pkg/index/search_test.go
/// ```
fn render_result_row(frame: &mut Frame, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    frame.goto(row, 1);
    frame.push(&base);
    frame.push(if item.is_selected { "▸ " } else { "  " });

    let label = clip(&item.label, cols.saturating_sub(2));
    helpers::render_highlighted_text(frame, label, &item.highlight_ranges, theme, item.is_selected, &base);

    frame.pad(cols.saturating_sub(2 + label.chars().count()));
    frame.push(Theme::reset());
    row + 1
}
