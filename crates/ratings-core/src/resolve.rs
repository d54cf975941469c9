//! Match resolution: deterministic selection among overlapping candidates.
//!
//! The matcher scans every symbol set independently, so a single run of text
//! can produce several candidate readings (e.g. stars with half support vs. a
//! full-only set sharing a glyph). Resolution keeps the earliest, leftmost
//! non-overlapping matches; ties at the same start offset fall to catalog
//! order because the sort is stable and the matcher emits in catalog order.

use crate::catalog::SymbolCatalog;
use crate::matcher::{RatingMatch, find_matches};

/// Sort candidates by start offset and greedily drop any match overlapping
/// an already-kept one (first wins). Overlap is judged on the full consumed
/// span, annotation included.
pub fn resolve(mut matches: Vec<RatingMatch>) -> Vec<RatingMatch> {
    matches.sort_by_key(|m| m.start);

    let mut resolved: Vec<RatingMatch> = Vec::with_capacity(matches.len());
    let mut last_end: Option<usize> = None;
    for m in matches {
        if last_end.is_none_or(|end| m.start >= end) {
            last_end = Some(m.span_end());
            resolved.push(m);
        }
    }
    resolved
}

/// Like [`resolve`], but additionally drops any match whose span, widened by
/// one character on each side, contains the cursor. The run under active
/// typing must never be swallowed into a rendered widget.
pub fn resolve_for_editing(matches: Vec<RatingMatch>, cursor: usize) -> Vec<RatingMatch> {
    resolve(matches)
        .into_iter()
        .filter(|m| !is_cursor_adjacent(m, cursor))
        .collect()
}

/// Scan a line and resolve in one step; the shape renderers want.
pub fn scan_line(text: &str, catalog: &SymbolCatalog) -> Vec<RatingMatch> {
    resolve(find_matches(text, catalog))
}

/// Scan a line for an editing context: resolved matches adjacent to the
/// cursor are suppressed.
pub fn scan_line_for_editing(
    text: &str,
    catalog: &SymbolCatalog,
    cursor: usize,
) -> Vec<RatingMatch> {
    resolve_for_editing(find_matches(text, catalog), cursor)
}

fn is_cursor_adjacent(m: &RatingMatch, cursor: usize) -> bool {
    cursor + 1 >= m.start && cursor <= m.span_end() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SymbolCatalog, SymbolSet};

    fn candidate(start: usize, end: usize) -> RatingMatch {
        RatingMatch {
            pattern: "★★★".to_string(),
            start,
            end,
            symbol_set: SymbolSet::new("★", "☆", None),
            rating: 3.0,
            annotation: None,
        }
    }

    #[test]
    fn overlapping_candidates_keep_the_first() {
        let resolved = resolve(vec![candidate(2, 8), candidate(0, 6)]);
        assert_eq!(resolved.len(), 1);
        assert_eq!((resolved[0].start, resolved[0].end), (0, 6));
    }

    #[test]
    fn adjacent_matches_both_survive() {
        let resolved = resolve(vec![candidate(0, 6), candidate(6, 12)]);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn ties_at_same_start_fall_to_input_order() {
        let mut a = candidate(0, 6);
        a.pattern = "first".to_string();
        let mut b = candidate(0, 6);
        b.pattern = "second".to_string();
        let resolved = resolve(vec![a, b]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].pattern, "first");
    }

    #[test]
    fn overlap_includes_the_annotation_span() {
        use crate::annotation::{Annotation, AnnotationFormat};

        let mut first = candidate(0, 5);
        first.annotation = Some(Annotation {
            format: AnnotationFormat::Fraction,
            numerator: 3.0,
            denominator: 5,
            text: " 3/5".to_string(),
            end_offset: 9,
        });
        // Starts inside the first match's annotation; it loses.
        let second = candidate(7, 12);
        let resolved = resolve(vec![first, second]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].start, 0);
    }

    #[test]
    fn cross_set_overlap_resolves_by_position_then_catalog_order() {
        let catalog = SymbolCatalog::default();
        // "○" belongs to both the circles set and the bold-circle set; the
        // bold-circle reading covers the whole run from offset 0 and wins.
        let resolved = scan_line("⬤⬤⬤○○○", &catalog);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].pattern, "⬤⬤⬤○○○");
        assert_eq!(resolved[0].rating, 3.0);
    }

    #[test]
    fn cursor_adjacency_suppresses_a_match() {
        let catalog = SymbolCatalog::default();
        let text = "★★★☆☆ ok";

        // Inside the span.
        assert!(scan_line_for_editing(text, &catalog, 2).is_empty());
        // One past the end is still adjacent.
        assert!(scan_line_for_editing(text, &catalog, 6).is_empty());
        // One before the start is still adjacent (offset 0 here).
        assert!(scan_line_for_editing("x★★★☆☆", &catalog, 0).is_empty());
        // Far away: the match renders.
        assert_eq!(scan_line_for_editing(text, &catalog, 8).len(), 1);
    }

    #[test]
    fn scan_line_resolves_multiple_runs() {
        let catalog = SymbolCatalog::default();
        let resolved = scan_line("★★★☆☆ and ●●◐○○ 2.5/5", &catalog);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].pattern, "★★★☆☆");
        assert_eq!(resolved[1].pattern, "●●◐○○");
        assert_eq!(resolved[1].rating, 2.5);
    }
}
