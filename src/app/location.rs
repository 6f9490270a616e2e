//! Location fragments: `#` followed by the URL-encoded filename.

use crate::domain::error::{Result, ZearchError};

/// Builds the fragment pointing at `filename`.
#[must_use]
pub fn fragment_for(filename: &str) -> String {
    format!("#{}", urlencoding::encode(filename))
}

/// Decodes the filename a fragment points at.
///
/// Fragments shorter than two characters point nowhere and yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`ZearchError::Location`] if the fragment does not start with `#`
/// or its encoded part is not valid UTF-8 once decoded.
pub fn decode_fragment(fragment: &str) -> Result<Option<String>> {
    if fragment.chars().count() < 2 {
        return Ok(None);
    }
    let encoded = fragment
        .strip_prefix('#')
        .ok_or_else(|| ZearchError::Location(format!("fragment {fragment:?} does not start with '#'")))?;

    urlencoding::decode(encoded)
        .map(|name| Some(name.into_owned()))
        .map_err(|e| ZearchError::Location(format!("fragment {fragment:?} is not valid UTF-8: {e}")))
}

/// Encodes a filename for use as a URL path, keeping `/` separators.
#[must_use]
pub fn encode_path(filename: &str) -> String {
    filename
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_encode_the_whole_name() {
        assert_eq!(fragment_for("pkg/x.go"), "#pkg%2Fx.go");
        assert_eq!(fragment_for("a b.go"), "#a%20b.go");
    }

    #[test]
    fn decoding_inverts_encoding() {
        assert_eq!(decode_fragment("#pkg%2Fx.go").unwrap().as_deref(), Some("pkg/x.go"));
        assert_eq!(decode_fragment("#plain.go").unwrap().as_deref(), Some("plain.go"));
    }

    #[test]
    fn short_fragments_point_nowhere() {
        assert_eq!(decode_fragment("").unwrap(), None);
        assert_eq!(decode_fragment("#").unwrap(), None);
    }

    #[test]
    fn malformed_fragments_are_location_errors() {
        assert!(matches!(decode_fragment("pkg"), Err(ZearchError::Location(_))));
        assert!(matches!(decode_fragment("#%FF%FE"), Err(ZearchError::Location(_))));
    }

    #[test]
    fn paths_keep_their_separators() {
        assert_eq!(encode_path("pkg/x.go"), "pkg/x.go");
        assert_eq!(encode_path("my dir/a#b.go"), "my%20dir/a%23b.go");
    }
}
