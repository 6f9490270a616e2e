//! Shared rendering utilities.
//!
//! Components paint into a [`Frame`], an in-memory buffer of text and ANSI
//! escapes. The renderer prints the finished frame in one go. All widths are
//! counted in characters.

use crate::ui::theme::Theme;

/// Width of a tab stop in the code view.
pub const TAB_WIDTH: usize = 4;

/// Buffer receiving one rendered frame.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions the cursor (1-indexed).
    pub fn goto(&mut self, row: usize, col: usize) {
        self.buf.push_str(&format!("\u{1b}[{row};{col}H"));
    }

    /// Appends text or escapes.
    pub fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Appends `n` spaces.
    pub fn pad(&mut self, n: usize) {
        self.buf.extend(std::iter::repeat(' ').take(n));
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Returns the frame with escape sequences removed, for inspection.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.buf.len());
        let mut chars = self.buf.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\u{1b}' {
                out.push(c);
                continue;
            }
            if chars.peek() == Some(&'[') {
                chars.next();
                if let Some(end) = chars.by_ref().find(char::is_ascii_alphabetic) {
                    if end == 'H' {
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn clip(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Replaces tabs with spaces up to the next tab stop, starting at `column`.
#[must_use]
pub fn expand_tabs(text: &str, column: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + TAB_WIDTH);
    let mut col = column;
    for c in text.chars() {
        if c == '\t' {
            let n = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(n));
            col += n;
        } else {
            out.push(c);
            col += 1;
        }
    }
    out
}

/// Paints text with highlighted character ranges for fuzzy matches.
///
/// `ranges` are `(start, end)` character indices, end exclusive. Selected rows
/// skip match highlighting so the selection colors stay readable. After each
/// highlighted run the `restore` escape is re-applied.
pub fn render_highlighted_text(
    frame: &mut Frame,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        frame.push(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            frame.push(&chars[current_pos..start].iter().collect::<String>());
        }

        frame.push(&Theme::fg(&theme.colors.match_highlight_fg));
        frame.push(&Theme::bg(&theme.colors.match_highlight_bg));
        frame.push(&chars[start..end].iter().collect::<String>());
        frame.push(Theme::reset());
        frame.push(restore);

        current_pos = end;
    }

    if current_pos < chars.len() {
        frame.push(&chars[current_pos..].iter().collect::<String>());
    }
}
