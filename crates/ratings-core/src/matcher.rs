//! Pattern matcher: locates rating symbol runs in a text buffer.
//!
//! Each symbol set in the catalog is scanned independently, so the raw
//! result may contain overlapping candidates; [`crate::resolve`] picks the
//! winners. All offsets are character offsets; rating values and run lengths
//! are computed over grapheme clusters.

use unicode_segmentation::UnicodeSegmentation;

use crate::annotation::{Annotation, parse_annotation};
use crate::catalog::{SymbolCatalog, SymbolSet};
use crate::text::{CharIndex, grapheme_len};

/// Minimum grapheme clusters for a run with no annotation. Shorter runs are
/// likely decorative; an explicit `x/y` label overrides the floor.
const MIN_BARE_RUN: usize = 3;

/// A located occurrence of a rating symbol run in a text buffer.
///
/// Never mutated: changing the rating produces a replacement string via
/// [`crate::codec::build_replacement`], not an in-place edit.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatch {
    /// The matched symbol run.
    pub pattern: String,
    /// Character offset of the run start (inclusive).
    pub start: usize,
    /// Character offset just past the run (exclusive of any annotation).
    pub end: usize,
    /// The symbol set that produced the match.
    pub symbol_set: SymbolSet,
    /// Half-integer rating: full glyphs count 1.0, half glyphs 0.5.
    pub rating: f64,
    /// The trailing rating label, when present.
    pub annotation: Option<Annotation>,
}

impl RatingMatch {
    /// End of the full consumed span: the annotation end when present,
    /// otherwise the symbol-run end. Resolution and replacement both operate
    /// over `[start, span_end())`.
    pub fn span_end(&self) -> usize {
        self.annotation.as_ref().map_or(self.end, |a| a.end_offset)
    }

    /// Number of rating slots in the run, in grapheme clusters.
    pub fn slot_count(&self) -> usize {
        grapheme_len(&self.pattern)
    }
}

/// Compute the rating of a symbol run by grapheme-cluster iteration.
///
/// ```rust
/// use ratings_core::{SymbolSet, compute_rating};
///
/// let circles = SymbolSet::new("●", "○", Some("◐"));
/// assert_eq!(compute_rating("●●◐○○", &circles), 2.5);
/// ```
pub fn compute_rating(pattern: &str, set: &SymbolSet) -> f64 {
    let mut rating = 0.0;
    for glyph in pattern.graphemes(true) {
        if glyph == set.full {
            rating += 1.0;
        } else if set.half.as_deref() == Some(glyph) {
            rating += 0.5;
        }
    }
    rating
}

/// Scan `text` for rating runs across every symbol set in the catalog.
///
/// The result is unsorted and may contain overlapping candidates from
/// different sets; pass it through [`crate::resolve::resolve`] before use.
pub fn find_matches(text: &str, catalog: &SymbolCatalog) -> Vec<RatingMatch> {
    let index = CharIndex::new(text);
    let mut matches = Vec::new();

    for compiled in catalog.compiled() {
        let set = &compiled.set;
        for m in compiled.regex.find_iter(text) {
            let pattern = m.as_str();
            let start = index.byte_to_char(m.start());
            let end = index.byte_to_char(m.end());

            let rating = compute_rating(pattern, set);
            // Full-only sets cannot express zero; such a match is noise.
            if set.is_full_only() && rating == 0.0 {
                continue;
            }

            let annotation = parse_annotation(text, end);
            if annotation.is_none() && grapheme_len(pattern) < MIN_BARE_RUN {
                continue;
            }

            log::debug!(
                "rating match {:?} at [{}, {}) rating={} annotation={:?}",
                pattern,
                start,
                end,
                rating,
                annotation.as_ref().map(|a| a.text.as_str())
            );
            matches.push(RatingMatch {
                pattern: pattern.to_string(),
                start,
                end,
                symbol_set: set.clone(),
                rating,
                annotation,
            });
        }
    }

    matches
}
