//! Unicode text helpers.
//!
//! All public offsets in this crate are **character offsets** (Unicode scalar
//! values, i.e. `char` positions), never UTF-16 code units or raw bytes.
//! Counting, on the other hand, uses **extended grapheme clusters**, so a
//! ZWJ-joined emoji sequence or a flag counts as a single rating symbol.

use unicode_segmentation::UnicodeSegmentation;

/// Returns the length of `s` in extended grapheme clusters.
///
/// This is the unit used for rating slot counts and minimum-run filtering:
/// a multi-codepoint emoji counts as one symbol.
///
/// ```rust
/// assert_eq!(ratings_core::text::grapheme_len("★★★"), 3);
/// assert_eq!(ratings_core::text::grapheme_len("👩‍🚀"), 1);
/// ```
pub fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Returns the substring of `s` covering grapheme clusters `[start, end)`.
///
/// Out-of-range indices are clamped to the cluster count.
pub fn grapheme_substring(s: &str, start: usize, end: usize) -> String {
    s.graphemes(true)
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

/// Returns the byte offset of the `char_offset`-th character of `s`.
///
/// Offsets past the end of the string map to `s.len()`.
pub(crate) fn byte_of_char(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// Byte-offset / char-offset conversion table for a single text buffer.
///
/// Regex matching yields byte offsets; public APIs speak char offsets. The
/// table is built once per scan and queried with binary search.
#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}
