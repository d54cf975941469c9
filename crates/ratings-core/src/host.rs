//! Host editor interface and a text-grid reference host.
//!
//! The engine never owns a document or a screen. It consumes four primitives
//! from whatever editor embeds it, expressed as the [`HostEditor`] trait:
//! line text access, coordinate↔position mapping, and a range-replacement
//! primitive. [`GridHost`] is a complete reference implementation over a
//! rope with a fixed-size character-cell grid, suitable for terminal-style
//! embedders and used by the integration tests.

use ropey::Rope;
use unicode_width::UnicodeWidthChar;

/// A position in the hosted document: a zero-based line and a character
/// offset within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPosition {
    /// Zero-based logical line index.
    pub line: usize,
    /// Character offset within the line.
    pub offset: usize,
}

impl TextPosition {
    /// Create a new position.
    pub fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }
}

/// A screen-space bounding box, in whatever unit the host renders with
/// (pixels, or cells scaled by the host).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Left edge (inclusive).
    pub left: f64,
    /// Top edge (inclusive).
    pub top: f64,
    /// Right edge (exclusive).
    pub right: f64,
    /// Bottom edge (exclusive).
    pub bottom: f64,
}

impl ScreenRect {
    /// Create a new rect.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    /// Returns `true` if the point lies inside the rect.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Smallest rect covering both inputs.
    pub fn union(&self, other: &ScreenRect) -> ScreenRect {
        ScreenRect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// The contract the embedding editor implements for the engine.
///
/// Mapping methods return `None` when the host cannot answer (position
/// outside the document, layout in transition); the interaction layer
/// silently no-ops that event rather than failing.
pub trait HostEditor {
    /// Text of the given line, without its line terminator.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Map a screen coordinate to a document position.
    fn position_at_coords(&self, x: f64, y: f64) -> Option<TextPosition>;

    /// Map a document position to its caret rectangle on screen.
    fn coords_at_position(&self, line: usize, offset: usize) -> Option<ScreenRect>;

    /// Replace characters `[start, end)` of `line` with `text`.
    fn replace_range(&mut self, line: usize, start: usize, end: usize, text: &str);
}

/// Reference host: a rope-backed document rendered on a fixed-size cell
/// grid, one UAX #11 width unit per cell.
///
/// ```rust
/// use ratings_core::{GridHost, HostEditor};
///
/// let host = GridHost::new("★★★☆☆ 3/5", 8.0, 16.0);
/// assert_eq!(host.line_text(0).unwrap(), "★★★☆☆ 3/5");
/// let pos = host.position_at_coords(20.0, 4.0).unwrap();
/// assert_eq!((pos.line, pos.offset), (0, 2));
/// ```
#[derive(Debug, Clone)]
pub struct GridHost {
    rope: Rope,
    cell_width: f64,
    cell_height: f64,
}

impl GridHost {
    /// Create a host over `text` with the given cell geometry.
    pub fn new(text: &str, cell_width: f64, cell_height: f64) -> Self {
        Self {
            rope: Rope::from_str(text),
            cell_width,
            cell_height,
        }
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of logical lines.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Cell width of `ch` per UAX #11; controls and zero-width marks occupy
    /// no cell of their own.
    fn char_cells(ch: char) -> usize {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }

    /// Visual cell column of `offset` within `line_text`.
    fn visual_cells(line_text: &str, offset: usize) -> usize {
        line_text
            .chars()
            .take(offset)
            .map(Self::char_cells)
            .sum()
    }
}

impl HostEditor for GridHost {
    fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        // Rope lines keep their terminator; callers get bare line text.
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    fn position_at_coords(&self, x: f64, y: f64) -> Option<TextPosition> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let line = (y / self.cell_height).floor() as usize;
        let line_text = self.line_text(line)?;

        let target_cell = (x / self.cell_width).floor() as usize;
        let mut cell = 0;
        for (offset, ch) in line_text.chars().enumerate() {
            let next = cell + Self::char_cells(ch);
            if target_cell < next {
                return Some(TextPosition::new(line, offset));
            }
            cell = next;
        }
        // Past the end of the line: clamp to the line length.
        Some(TextPosition::new(line, line_text.chars().count()))
    }

    fn coords_at_position(&self, line: usize, offset: usize) -> Option<ScreenRect> {
        let line_text = self.line_text(line)?;
        if offset > line_text.chars().count() {
            return None;
        }
        let left = Self::visual_cells(&line_text, offset) as f64 * self.cell_width;
        let top = line as f64 * self.cell_height;
        Some(ScreenRect::new(left, top, left, top + self.cell_height))
    }

    fn replace_range(&mut self, line: usize, start: usize, end: usize, text: &str) {
        if line >= self.rope.len_lines() {
            return;
        }
        let line_start = self.rope.line_to_char(line);
        let line_len = self.line_text(line).map(|t| t.chars().count()).unwrap_or(0);
        let from = line_start + start.min(line_len);
        let to = line_start + end.min(line_len);
        if from > to {
            return;
        }
        self.rope.remove(from..to);
        self.rope.insert(from, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_text_strips_terminators() {
        let host = GridHost::new("one\ntwo\r\nthree", 8.0, 16.0);
        assert_eq!(host.line_text(0).unwrap(), "one");
        assert_eq!(host.line_text(1).unwrap(), "two");
        assert_eq!(host.line_text(2).unwrap(), "three");
        assert_eq!(host.line_text(9), None);
    }

    #[test]
    fn coords_round_trip_on_the_grid() {
        let host = GridHost::new("abc\ndef", 10.0, 20.0);
        let pos = host.position_at_coords(15.0, 25.0).unwrap();
        assert_eq!((pos.line, pos.offset), (1, 1));

        let rect = host.coords_at_position(1, 1).unwrap();
        assert_eq!(rect.left, 10.0);
        assert_eq!(rect.top, 20.0);
        assert_eq!(rect.bottom, 40.0);
    }

    #[test]
    fn wide_characters_occupy_two_cells() {
        // "🌕" is double-width; offset 1 sits two cells in.
        let host = GridHost::new("🌕🌕🌑", 8.0, 16.0);
        let rect = host.coords_at_position(0, 1).unwrap();
        assert_eq!(rect.left, 16.0);

        let pos = host.position_at_coords(17.0, 0.0).unwrap();
        assert_eq!(pos.offset, 1);
    }

    #[test]
    fn positions_past_the_line_clamp() {
        let host = GridHost::new("ab", 10.0, 10.0);
        let pos = host.position_at_coords(500.0, 5.0).unwrap();
        assert_eq!(pos.offset, 2);
        assert_eq!(host.position_at_coords(5.0, 500.0), None);
        assert_eq!(host.coords_at_position(0, 3), None);
    }

    #[test]
    fn replace_range_edits_in_place() {
        let mut host = GridHost::new("rate: ★★★☆☆ 3/5 end\nnext", 8.0, 16.0);
        host.replace_range(0, 6, 15, "★★★★☆ 4/5");
        assert_eq!(host.line_text(0).unwrap(), "rate: ★★★★☆ 4/5 end");
        assert_eq!(host.line_text(1).unwrap(), "next");
    }

    #[test]
    fn rect_union_and_contains() {
        let a = ScreenRect::new(0.0, 0.0, 10.0, 10.0);
        let b = ScreenRect::new(5.0, 2.0, 20.0, 8.0);
        let u = a.union(&b);
        assert_eq!((u.left, u.top, u.right, u.bottom), (0.0, 0.0, 20.0, 10.0));
        assert!(u.contains(15.0, 5.0));
        assert!(!u.contains(25.0, 5.0));
        assert_eq!(b.width(), 15.0);
    }
}
