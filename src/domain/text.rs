//! Making backend text safe to paint.
//!
//! File contents and filenames come straight from the backend. Control
//! characters in them would be interpreted by the terminal (cursor moves,
//! screen clears, title changes), so they are swapped for a visible marker
//! before anything reaches a frame.

use std::borrow::Cow;

/// Stands in for a control character in painted text.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Replaces control characters other than tab and newline with [`REPLACEMENT`].
///
/// `\r\n` pairs become `\n` first, so Windows line endings survive; a lone
/// `\r` is replaced like any other control character. C0, DEL and C1 are all
/// covered. Text without control characters is borrowed as is.
///
/// # Examples
///
/// ```
/// use zearch::domain::text::printable;
///
/// assert_eq!(printable("a\tb\r\nc"), "a\tb\nc");
/// assert_eq!(printable("\x1b[2J"), "\u{FFFD}[2J");
/// ```
#[must_use]
pub fn printable(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| c.is_control() && c != '\t' && c != '\n') {
        return Cow::Borrowed(text);
    }

    let text = text.replace("\r\n", "\n");
    Cow::Owned(
        text.chars()
            .map(|c| match c {
                '\t' | '\n' => c,
                c if c.is_control() => REPLACEMENT,
                c => c,
            })
            .collect(),
    )
}
