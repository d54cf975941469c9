//! Trailing rating-text annotation parsing.
//!
//! A rating run may be followed by a textual label expressing the same value:
//! `3/5`, `(3/5)`, `60%`, `(60%)`, or the hidden comment form `<!-- 3/5 -->`.
//! Visible forms take precedence over the comment form; when a visible label
//! is immediately followed by a comment, both are consumed as one span and
//! the visible values win.
//!
//! Offsets are character offsets, consistent with the rest of the crate.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::byte_of_char;

/// The textual format of a rating annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFormat {
    /// Bare fraction: `3/5`.
    Fraction,
    /// Parenthesized fraction: `(3/5)`.
    FractionParens,
    /// Bare percentage: `60%`.
    Percent,
    /// Parenthesized percentage: `(60%)`.
    PercentParens,
    /// HTML-comment fraction: `<!-- 3/5 -->`. Read on any symbol set, but
    /// only ever written back for full-only sets.
    CommentFraction,
}

impl AnnotationFormat {
    /// Returns `true` for the two percentage formats.
    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Percent | Self::PercentParens)
    }
}

/// A textual rating label immediately following a symbol run.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Which textual format the label uses.
    pub format: AnnotationFormat,
    /// The labeled value; may carry a half step (e.g. `2.5/5`).
    pub numerator: f64,
    /// The labeled scale; always 100 for percent formats, always > 0.
    pub denominator: u32,
    /// The matched label text, leading whitespace included.
    pub text: String,
    /// Character offset just past the last consumed character (including a
    /// trailing comment label when both forms are present).
    pub end_offset: usize,
}

static VISIBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(?:\((\d+(?:\.\d+)?)/(\d+)\)|(\d+(?:\.\d+)?)/(\d+)|(\()?(\d+)%\)?)")
        .expect("visible annotation pattern compiles")
});

static COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*<!--\s*(\d+(?:\.\d+)?)/(\d+)\s*-->")
        .expect("comment annotation pattern compiles")
});

/// Parse the annotation following a symbol run, if any.
///
/// `match_end` is the character offset just past the symbol run in `line`.
/// Returns `None` when the following text matches no recognized grammar
/// (which leaves the symbol run itself a perfectly valid match).
pub fn parse_annotation(line: &str, match_end: usize) -> Option<Annotation> {
    let after = &line[byte_of_char(line, match_end)..];

    if let Some(caps) = VISIBLE.captures(after) {
        let token = caps.get(0).expect("group 0 always present").as_str();
        let (format, numerator, denominator) = if let (Some(n), Some(d)) = (caps.get(1), caps.get(2)) {
            (
                AnnotationFormat::FractionParens,
                n.as_str().parse::<f64>().ok()?,
                d.as_str().parse::<u32>().ok()?,
            )
        } else if let (Some(n), Some(d)) = (caps.get(3), caps.get(4)) {
            (
                AnnotationFormat::Fraction,
                n.as_str().parse::<f64>().ok()?,
                d.as_str().parse::<u32>().ok()?,
            )
        } else {
            let format = if caps.get(5).is_some() {
                AnnotationFormat::PercentParens
            } else {
                AnnotationFormat::Percent
            };
            (format, caps.get(6)?.as_str().parse::<f64>().ok()?, 100)
        };
        if denominator == 0 {
            return None;
        }

        // A comment label directly after the visible one belongs to the same
        // annotation: it is consumed with it, but the visible values win.
        let mut consumed_chars = token.chars().count();
        if let Some(comment) = COMMENT.find(&after[token.len()..]) {
            consumed_chars += comment.as_str().chars().count();
        }

        return Some(Annotation {
            format,
            numerator,
            denominator,
            text: token.to_string(),
            end_offset: match_end + consumed_chars,
        });
    }

    let caps = COMMENT.captures(after)?;
    let token = caps.get(0).expect("group 0 always present").as_str();
    let numerator = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let denominator = caps.get(2)?.as_str().parse::<u32>().ok()?;
    if denominator == 0 {
        return None;
    }
    Some(Annotation {
        format: AnnotationFormat::CommentFraction,
        numerator,
        denominator,
        text: token.to_string(),
        end_offset: match_end + token.chars().count(),
    })
}
