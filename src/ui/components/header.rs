//! Header component: breadcrumbs of the open file.

use crate::ui::helpers::{clip, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Shown when no file is open.
const TITLE: &str = "zearch";

const SEPARATOR: &str = " / ";

/// Renders the breadcrumb bar at `row` and returns the next free row.
///
/// Leading segments use `breadcrumb_fg`; the last one, the file itself, is
/// bold in `breadcrumb_current_fg`. Without an open file the plugin title is
/// shown instead. Text beyond `cols` is clipped.
///
/// ```text
///  pkg / index / search.go
/// ```
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let base = theme
        .colors
        .header_bg
        .as_ref()
        .map_or_else(String::new, |bg| Theme::bg(bg));

    frame.goto(row, 1);
    frame.push(&base);
    frame.pad(1);
    let mut used = 1;

    if header.segments.is_empty() {
        frame.push(Theme::bold());
        frame.push(&Theme::fg(&theme.colors.header_fg));
        let title = clip(TITLE, cols.saturating_sub(used));
        frame.push(title);
        used += title.chars().count();
    }

    let last = header.segments.len().saturating_sub(1);
    for (i, segment) in header.segments.iter().enumerate() {
        if i > 0 {
            frame.push(&Theme::fg(&theme.colors.text_dim));
            let sep = clip(SEPARATOR, cols.saturating_sub(used));
            frame.push(sep);
            used += sep.chars().count();
        }
        if i == last {
            frame.push(Theme::bold());
            frame.push(&Theme::fg(&theme.colors.breadcrumb_current_fg));
        } else {
            frame.push(&Theme::fg(&theme.colors.breadcrumb_fg));
        }
        let text = clip(segment, cols.saturating_sub(used));
        frame.push(text);
        used += text.chars().count();
    }

    frame.push(Theme::reset());
    frame.push(&base);
    frame.pad(cols.saturating_sub(used));
    frame.push(Theme::reset());
    row + 1
}
