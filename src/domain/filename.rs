//! Filename helpers shared by the effects and the renderer.
//!
//! Filenames are the document identifiers handed out by the backend: slash
//! separated paths relative to the served root (`pkg/x.go`).

use crate::domain::text::printable;

/// Default maximum label width for result list entries.
pub const DEFAULT_LABEL_WIDTH: usize = 90;

/// Abbreviates a filename so it fits in `max_width` characters.
///
/// Names longer than `max_width` keep their first third and last two thirds
/// of the available room, joined by `...`. With the default width of 90 this
/// keeps 29 leading and 58 trailing characters, so both the top-level package
/// and the file itself stay readable.
///
/// Lengths are counted in characters, not bytes. Control characters are
/// replaced before measuring, so a label is always safe to paint.
///
/// # Examples
///
/// ```
/// use zearch::domain::filename::to_label;
///
/// assert_eq!(to_label("pkg/x.go", 90), "pkg/x.go");
/// let long = "a".repeat(95);
/// assert_eq!(to_label(&long, 90).chars().count(), 90);
/// ```
#[must_use]
pub fn to_label(filename: &str, max_width: usize) -> String {
    let filename = printable(filename);
    let len = filename.chars().count();
    if len <= max_width {
        return filename.into_owned();
    }

    let left = max_width.saturating_sub(3) / 3;
    let right = left * 2;

    let start: String = filename.chars().take(left).collect();
    let end: String = filename.chars().skip(len.saturating_sub(right)).collect();
    format!("{start}...{end}")
}

/// Splits a filename into breadcrumb segments.
///
/// An absent or empty name yields no segments. Segments are safe to paint.
#[must_use]
pub fn segments(filename: Option<&str>) -> Vec<String> {
    match filename {
        None | Some("") => Vec::new(),
        Some(name) => printable(name).split('/').map(String::from).collect(),
    }
}

/// Returns the language selector for a filename.
///
/// This is the text after the last `.`, or the whole name when there is no
/// dot (`Makefile` selects `Makefile`).
#[must_use]
pub fn language(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_untouched() {
        let name = "x".repeat(90);
        assert_eq!(to_label(&name, 90), name);
    }

    #[test]
    fn long_names_keep_prefix_and_suffix() {
        let name: String = (0..95)
            .map(|i| char::from(b'a' + u8::try_from(i % 26).unwrap()))
            .collect();
        let label = to_label(&name, 90);

        assert_eq!(label.chars().count(), 29 + 3 + 58);
        assert!(label.starts_with(&name[..29]));
        assert!(label.ends_with(&name[95 - 58..]));
        assert_eq!(&label[29..32], "...");
    }

    #[test]
    fn truncation_counts_characters() {
        let name = "é".repeat(100);
        let label = to_label(&name, 90);
        assert_eq!(label.chars().count(), 90);
    }

    #[test]
    fn labels_and_segments_are_printable() {
        let name = "pkg/\x1b]0;pwned\x07/x\r.go";
        assert_eq!(to_label(name, 90), "pkg/\u{FFFD}]0;pwned\u{FFFD}/x\u{FFFD}.go");
        assert_eq!(segments(Some(name))[1], "\u{FFFD}]0;pwned\u{FFFD}");
    }

    #[test]
    fn segments_split_on_slashes() {
        assert_eq!(segments(Some("pkg/x.go")), vec!["pkg", "x.go"]);
        assert_eq!(segments(Some("x.go")), vec!["x.go"]);
        assert!(segments(Some("")).is_empty());
        assert!(segments(None).is_empty());
    }

    #[test]
    fn language_is_the_last_extension() {
        assert_eq!(language("pkg/x.go"), "go");
        assert_eq!(language("archive.tar.gz"), "gz");
        assert_eq!(language("Makefile"), "Makefile");
    }
}
