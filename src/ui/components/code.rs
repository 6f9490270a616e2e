//! Code view component: highlighted source with a line number gutter.

use crate::ui::helpers::{clip, expand_tabs, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CodePane;

/// Renders the visible lines starting at `row`; returns the next free row.
///
/// ```text
///  9 │ package index
/// 10 │
/// 11 │ import "strings"
/// ```
///
/// Tokens are colored by kind and clipped at the right edge.
pub fn render_code(frame: &mut Frame, row: usize, pane: &CodePane, theme: &Theme) -> usize {
    let gutter = pane.gutter_width;
    let text_width = pane.width.saturating_sub(gutter + 3);
    let mut current_row = row;

    for (offset, line) in pane.lines.iter().enumerate() {
        frame.goto(current_row, 1);
        frame.push(&Theme::fg(&theme.colors.line_number_fg));
        frame.push(&format!("{:>gutter$} │ ", pane.first_line_number + offset));

        let mut used = 0;
        for token in line {
            if used >= text_width {
                break;
            }
            let text = expand_tabs(&token.text, used);
            let text = clip(&text, text_width - used);
            frame.push(&Theme::fg(theme.token_color(token.kind)));
            frame.push(text);
            used += text.chars().count();
        }

        frame.push(Theme::reset());
        current_row += 1;
    }

    current_row
}
