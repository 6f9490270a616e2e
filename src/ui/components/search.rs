//! Search bar component with its progress indicator.

use crate::ui::helpers::{clip, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

const BUSY: &str = "searching ";
const IDLE: &str = "● ";
const CURSOR: &str = "▏";

/// Renders the three-line search box at `row` and returns the next free row.
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Search: foo▏      searching  │ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
///
/// The right edge holds the progress indicator: a busy label while a search
/// is in flight, the last error if the search failed, an idle dot otherwise.
/// The query is clipped from the left so its end stays visible.
pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    let (status, status_color) = if search.busy {
        (BUSY.to_string(), &theme.colors.indicator_busy_fg)
    } else if let Some(error) = &search.error {
        (format!("! {error} "), &theme.colors.error_fg)
    } else {
        (IDLE.to_string(), &theme.colors.indicator_idle_fg)
    };
    let status = clip(&status, inner_width / 2).to_string();
    let status_len = status.chars().count();

    let prompt = " Search: ";
    let cursor = if search.focused { CURSOR } else { "" };
    let room = inner_width.saturating_sub(status_len + prompt.len() + cursor.chars().count());
    let query = tail(&search.query, room);
    let text_len = prompt.len() + query.chars().count() + cursor.chars().count();

    border(frame, row, '┌', '┐', inner_width, theme);

    frame.goto(row + 1, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.push(&Theme::fg(&theme.colors.search_bar_border));
    frame.push("│");
    if search.focused {
        frame.push(Theme::bold());
    }
    frame.push(&Theme::fg(&theme.colors.text_normal));
    frame.push(clip(prompt, inner_width));
    frame.push(query);
    frame.push(cursor);
    frame.push(Theme::reset());
    frame.pad(inner_width.saturating_sub(text_len + status_len));
    frame.push(&Theme::fg(status_color));
    frame.push(&status);
    frame.push(&Theme::fg(&theme.colors.search_bar_border));
    frame.push("│");
    frame.push(Theme::reset());

    border(frame, row + 2, '└', '┘', inner_width, theme);

    row + 3
}

fn border(frame: &mut Frame, row: usize, left: char, right: char, inner_width: usize, theme: &Theme) {
    frame.goto(row, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.push(&Theme::fg(&theme.colors.search_bar_border));
    frame.push(&format!("{left}{}{right}", "─".repeat(inner_width)));
    frame.push(Theme::reset());
}

/// Last `width` characters of `text`.
fn tail(text: &str, width: usize) -> &str {
    let len = text.chars().count();
    if len <= width {
        return text;
    }
    let skip = len - width;
    text.char_indices().nth(skip).map_or("", |(idx, _)| &text[idx..])
}
