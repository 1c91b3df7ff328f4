//! Marker injection into template source
//!
//! Inserts a marker sequence at byte offsets of the UTF-8 source so the
//! preview can locate those positions after rendering. Offsets are given in
//! original-text coordinates; every insertion shifts the ones after it by the
//! marker's byte length.

use thiserror::Error;

/// Default marker: U+1F346, four bytes in UTF-8
pub const DEFAULT_MARKER: &str = "\u{1F346}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("marker must not be empty")]
    EmptyMarker,
    #[error("offset {offset} is past the end of the source ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },
    #[error("offset {offset} splits a multi-byte character")]
    NotCharBoundary { offset: usize },
    #[error("injected text is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Insert [`DEFAULT_MARKER`] at each offset
pub fn inject_markers<I>(text: &str, offsets: I) -> Result<String, MarkerError>
where
    I: IntoIterator<Item = usize>,
{
    inject_with(text, DEFAULT_MARKER, offsets)
}

/// Insert `marker` at each offset of `text`
///
/// Offsets are expected in ascending order. Each one is moved by the bytes
/// inserted before it, so `[0, 3]` on `"abc"` with a 4-byte marker inserts at
/// byte 0 and then at byte 7 of the grown buffer.
///
/// Fails if an offset lies past the end of the text or inside a multi-byte
/// character. Offsets that are not ascending are applied as given; if that
/// lands an insertion inside an earlier marker the final decode fails.
pub fn inject_with<I>(text: &str, marker: &str, offsets: I) -> Result<String, MarkerError>
where
    I: IntoIterator<Item = usize>,
{
    if marker.is_empty() {
        return Err(MarkerError::EmptyMarker);
    }

    let marker = marker.as_bytes();
    let mut bytes = text.as_bytes().to_vec();
    let mut inserted = 0usize;

    for offset in offsets {
        if offset > text.len() {
            return Err(MarkerError::OutOfBounds {
                offset,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(offset) {
            return Err(MarkerError::NotCharBoundary { offset });
        }

        let at = offset + inserted;
        bytes.splice(at..at, marker.iter().copied());
        inserted += marker.len();
    }

    String::from_utf8(bytes).map_err(|e| MarkerError::InvalidUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Remove every occurrence of `marker` from `text`
pub fn strip_markers(text: &str, marker: &str) -> String {
    if marker.is_empty() {
        return text.to_string();
    }
    text.replace(marker, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker_is_four_bytes() {
        assert_eq!(DEFAULT_MARKER.len(), 4);
        assert_eq!(DEFAULT_MARKER.chars().count(), 1);
    }

    #[test]
    fn test_no_offsets_is_identity() {
        assert_eq!(inject_markers("héllo", []).unwrap(), "héllo");
    }

    #[test]
    fn test_empty_marker_rejected() {
        assert_eq!(inject_with("abc", "", [0]), Err(MarkerError::EmptyMarker));
    }

    #[test]
    fn test_strip_markers() {
        let marked = format!("{DEFAULT_MARKER}a{DEFAULT_MARKER}b");
        assert_eq!(strip_markers(&marked, DEFAULT_MARKER), "ab");
    }
}
