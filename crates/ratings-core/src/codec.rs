//! Rating ↔ text conversions.
//!
//! Pure functions turning a numeric rating back into a symbol string and an
//! annotation label, plus [`build_replacement`] which composes both into the
//! single document edit a commit issues. The inverse direction is
//! [`crate::annotation::parse_annotation`] and
//! [`crate::matcher::compute_rating`]; the pairs round-trip exactly, with one
//! deliberate exception: a perfect-score comment-fraction on a full-only set
//! is elided entirely (every slot is visibly full, the label adds nothing).

use crate::annotation::AnnotationFormat;
use crate::catalog::SymbolSet;
use crate::matcher::RatingMatch;

/// Render a rating as `total_slots` glyphs: full below the integer part, the
/// half glyph at the boundary when the rating is fractional and the set
/// supports it, empty for the rest.
pub fn render_symbols(rating: f64, total_slots: usize, set: &SymbolSet) -> String {
    let full_slots = rating.max(0.0).floor() as usize;
    let fractional = rating > 0.0 && rating.fract() != 0.0;

    let mut out = String::new();
    for i in 0..total_slots {
        match &set.half {
            _ if i < full_slots => out.push_str(&set.full),
            Some(half) if i == full_slots && fractional => out.push_str(half),
            _ => out.push_str(&set.empty),
        }
    }
    out
}

/// Render a rating for writing back to the document.
///
/// Full-only sets emit exactly `floor(rating)` copies of the full glyph and
/// no padding: the empty glyph is the same character, so padded slots would
/// read as a higher rating. The true denominator lives in the annotation.
pub fn render_symbols_for_disk(rating: f64, total_slots: usize, set: &SymbolSet) -> String {
    if set.is_full_only() {
        return set.full.repeat(rating.max(0.0).floor() as usize);
    }
    render_symbols(rating, total_slots, set)
}

/// Format an annotation label for `rating`.
///
/// Percent formats compute `round(rating / actual_slots * 100)`; fraction
/// formats use the rating directly, rounded to an integer when the set has
/// no half glyph. Visible formats include their leading space; the comment
/// form does not. A perfect-score comment-fraction on a full-only set
/// returns the empty string.
pub fn format_annotation(
    format: AnnotationFormat,
    rating: f64,
    actual_slots: usize,
    denominator: u32,
    supports_half: bool,
    is_full_only: bool,
) -> String {
    let numerator = if format.is_percent() {
        if actual_slots == 0 {
            0.0
        } else {
            (rating / actual_slots as f64 * 100.0).round()
        }
    } else if supports_half {
        rating
    } else {
        rating.round()
    };

    if is_full_only
        && format == AnnotationFormat::CommentFraction
        && numerator == f64::from(denominator)
    {
        return String::new();
    }

    match format {
        AnnotationFormat::Fraction => format!(" {}/{}", display_number(numerator), denominator),
        AnnotationFormat::FractionParens => {
            format!(" ({}/{})", display_number(numerator), denominator)
        }
        AnnotationFormat::Percent => format!(" {}%", display_number(numerator)),
        AnnotationFormat::PercentParens => format!(" ({}%)", display_number(numerator)),
        AnnotationFormat::CommentFraction => {
            format!("<!-- {}/{} -->", display_number(numerator), denominator)
        }
    }
}

/// A single text edit replacing the full consumed span of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Character offset of the replaced range start (inclusive).
    pub start: usize,
    /// Character offset of the replaced range end (exclusive).
    pub end: usize,
    /// The replacement text: symbols plus optional annotation.
    pub text: String,
}

/// Build the one-edit replacement that commits `new_rating` into `m`.
///
/// The existing annotation's format and denominator are preserved. When the
/// match had no annotation, none is invented — for a full-only run that
/// means the denominator is simply unknown and the new glyph count stands on
/// its own.
pub fn build_replacement(m: &RatingMatch, new_rating: f64) -> Replacement {
    let set = &m.symbol_set;
    let is_full_only = set.is_full_only();
    let supports_half = set.supports_half() && !is_full_only;
    let slots = m.slot_count();

    let mut text = render_symbols_for_disk(new_rating, slots, set);
    if let Some(annotation) = &m.annotation {
        text.push_str(&format_annotation(
            annotation.format,
            new_rating,
            slots,
            annotation.denominator,
            supports_half,
            is_full_only,
        ));
    }

    Replacement {
        start: m.start,
        end: m.span_end(),
        text,
    }
}

/// Display a half-integer value the way it was parsed: no trailing `.0` on
/// whole numbers, `2.5` style otherwise.
fn display_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
