//! Selection highlighting in the preview source
//!
//! Wraps the selected part of the template in a highlight tag pair before it
//! is rendered, so the rendered preview shows where the editor selection is.
//! Columns count Unicode scalar values, never bytes.
//!
//! Only single-line highlighting is supported. For a selection spanning
//! lines the rebuilt start line takes its prefix from the start line, the
//! highlighted text from the start line only, and its suffix from the end
//! line; the end line itself is left in place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HIGHLIGHT_OPEN: &str = "<b>";
pub const DEFAULT_HIGHLIGHT_CLOSE: &str = "</b>";

/// An editor selection from `start` (anchor) to `end` (cursor)
///
/// Lines and columns are zero-based and columns count Unicode scalar values.
/// Editors reporting UTF-16 code-unit columns must convert before building one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Selection {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Build from an anchor/cursor pair; a collapsed pair is no selection
    pub fn from_anchor_cursor(anchor: (usize, usize), cursor: (usize, usize)) -> Option<Self> {
        if anchor == cursor {
            return None;
        }
        Some(Self::new(anchor.0, anchor.1, cursor.0, cursor.1))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

impl FromStr for Selection {
    type Err = String;

    /// Parse `LINE:COL-LINE:COL` (zero-based)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn point(s: &str) -> Option<(usize, usize)> {
            let (line, col) = s.trim().split_once(':')?;
            Some((line.parse().ok()?, col.parse().ok()?))
        }

        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| format!("expected LINE:COL-LINE:COL, got {s:?}"))?;
        let (start_line, start_col) =
            point(start).ok_or_else(|| format!("invalid selection start {start:?}"))?;
        let (end_line, end_col) =
            point(end).ok_or_else(|| format!("invalid selection end {end:?}"))?;
        Ok(Self::new(start_line, start_col, end_line, end_col))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("selection line {line} is outside the text ({line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },
    #[error("selection column {col} is past the end of line {line} ({len} characters)")]
    ColumnOutOfRange { line: usize, col: usize, len: usize },
}

/// Highlight with the default `<b>`/`</b>` pair
pub fn highlight_selection(
    text: &str,
    selection: Option<&Selection>,
) -> Result<String, HighlightError> {
    highlight_with(
        text,
        selection,
        DEFAULT_HIGHLIGHT_OPEN,
        DEFAULT_HIGHLIGHT_CLOSE,
    )
}

/// Wrap the selected substring of `text` in `open`/`close`
///
/// Returns `text` unchanged when there is no selection. Lines other than
/// the selection's start line are reproduced byte for byte.
pub fn highlight_with(
    text: &str,
    selection: Option<&Selection>,
    open: &str,
    close: &str,
) -> Result<String, HighlightError> {
    let Some(sel) = selection else {
        return Ok(text.to_string());
    };

    let lines: Vec<&str> = text.split('\n').collect();
    let start_line = line_at(&lines, sel.start_line)?;
    let end_line = line_at(&lines, sel.end_line)?;

    let start_len = start_line.chars().count();
    let end_len = end_line.chars().count();
    if sel.start_col > start_len {
        return Err(HighlightError::ColumnOutOfRange {
            line: sel.start_line,
            col: sel.start_col,
            len: start_len,
        });
    }
    if sel.end_col > end_len {
        return Err(HighlightError::ColumnOutOfRange {
            line: sel.end_line,
            col: sel.end_col,
            len: end_len,
        });
    }

    // The highlighted text always comes from the start line. A backwards
    // selection still highlights the characters between the two columns.
    let sub_end = sel.end_col.min(start_len);
    let (from, to) = if sel.start_col <= sub_end {
        (sel.start_col, sub_end)
    } else {
        (sub_end, sel.start_col)
    };
    let sub = &start_line[byte_index(start_line, from)..byte_index(start_line, to)];
    let prefix = &start_line[..byte_index(start_line, sel.start_col)];
    let suffix = &end_line[byte_index(end_line, sel.end_col)..];

    let rebuilt = format!("{prefix}{open}{sub}{close}{suffix}");
    let out: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| if idx == sel.start_line { rebuilt.as_str() } else { *line })
        .collect();
    Ok(out.join("\n"))
}

fn line_at<'a>(lines: &[&'a str], line: usize) -> Result<&'a str, HighlightError> {
    lines
        .get(line)
        .copied()
        .ok_or(HighlightError::LineOutOfRange {
            line,
            line_count: lines.len(),
        })
}

/// Byte index of the `col`-th character of `line` (or its length)
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_index_multibyte() {
        assert_eq!(byte_index("héllo", 0), 0);
        assert_eq!(byte_index("héllo", 2), 3);
        assert_eq!(byte_index("héllo", 5), 6);
        assert_eq!(byte_index("héllo", 9), 6);
    }

    #[test]
    fn test_selection_from_str() {
        assert_eq!(
            "0:2-1:4".parse::<Selection>().unwrap(),
            Selection::new(0, 2, 1, 4)
        );
        assert!("0:2".parse::<Selection>().is_err());
        assert!("a:b-c:d".parse::<Selection>().is_err());
    }

    #[test]
    fn test_selection_display_round_trips_cli_form() {
        let sel = Selection::new(3, 1, 3, 7);
        assert_eq!(sel.to_string().parse::<Selection>().unwrap(), sel);
    }

    #[test]
    fn test_collapsed_anchor_cursor_is_none() {
        assert_eq!(Selection::from_anchor_cursor((2, 5), (2, 5)), None);
        assert_eq!(
            Selection::from_anchor_cursor((2, 5), (2, 8)),
            Some(Selection::new(2, 5, 2, 8))
        );
    }
}
