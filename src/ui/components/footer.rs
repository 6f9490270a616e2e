//! Footer component: keybinding hints.

use crate::ui::helpers::{clip, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the centered, dimmed help line at `row`; returns the next row.
///
/// Text wider than the terminal is clipped.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = clip(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    frame.goto(row, 1);
    frame.push(&Theme::fg(&theme.colors.text_dim));
    frame.pad(padding);
    frame.push(help_text);
    frame.pad(cols.saturating_sub(padding + text_len));
    frame.push(Theme::reset());
    row + 1
}
