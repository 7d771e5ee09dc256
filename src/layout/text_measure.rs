//! Text Measurement
//!
//! Utilities for measuring text dimensions in terminal cells.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width characters: 0 cells
//!
//! Widths come from `unicode-width`. Text is never wrapped: lines break only
//! at explicit newlines, and runs are clipped or padded to a fixed width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Width of a single character; control characters count as zero.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Split text into lines at explicit newlines.
///
/// Unlike `str::lines`, empty text is one empty line, so an empty label
/// still occupies a row.
pub fn text_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Number of rows and widest row of multi-line text.
pub fn measure_text(text: &str) -> (usize, usize) {
    let lines = text_lines(text);
    let width = lines.iter().map(|l| string_width(l)).max().unwrap_or(0);
    (width, lines.len())
}

/// Cut text so it fits in `max_width` cells.
///
/// A wide character that would straddle the limit is dropped whole.
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = char_width(c);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out
}

/// Truncate or right-pad text with spaces to exactly `width` cells.
pub fn pad_text(text: &str, width: usize) -> String {
    let mut out = truncate_text(text, width);
    let used = string_width(&out);
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("日本"), 4);
        assert_eq!(string_width("°C"), 2);
    }

    #[test]
    fn test_text_lines() {
        assert_eq!(text_lines(""), vec![""]);
        assert_eq!(text_lines("a\nbc"), vec!["a", "bc"]);
        assert_eq!(text_lines("a\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_measure_text() {
        assert_eq!(measure_text("one\nthree\n"), (5, 3));
        assert_eq!(measure_text(""), (0, 1));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 3), "hel");
        assert_eq!(truncate_text("hi", 10), "hi");
        // Wide char does not fit in the last cell
        assert_eq!(truncate_text("a日", 2), "a");
    }

    #[test]
    fn test_pad_text() {
        assert_eq!(pad_text("ab", 4), "ab  ");
        assert_eq!(pad_text("abcdef", 4), "abcd");
        assert_eq!(pad_text("a日", 2), "a ");
    }
}
