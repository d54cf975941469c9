//! Symbol catalog: the ordered list of symbol sets used for matching.
//!
//! A [`SymbolSet`] is one visual rating alphabet (stars, circles, progress
//! blocks, or a single emoji used as an all-or-nothing "full-only" symbol).
//! The catalog compiles one regex per set up front, so malformed sets are
//! rejected when the catalog is built, never during a scan.
//!
//! Catalog order is matching priority: when a glyph appears in more than one
//! set, the first set that contains it wins. The catalog is immutable and
//! cheap to clone (`Arc` inside); configuration changes replace it wholesale
//! so an in-flight scan never observes a half-updated list.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// One visual rating alphabet: a full glyph, an empty glyph, and an optional
/// half glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSet {
    /// Glyph counted as a whole step (1.0).
    pub full: String,
    /// Glyph counted as zero.
    pub empty: String,
    /// Optional glyph counted as a half step (0.5).
    pub half: Option<String>,
}

impl SymbolSet {
    /// Create a symbol set. An empty `half` string is normalized to `None`.
    pub fn new(full: &str, empty: &str, half: Option<&str>) -> Self {
        Self {
            full: full.to_string(),
            empty: empty.to_string(),
            half: half.filter(|h| !h.is_empty()).map(str::to_string),
        }
    }

    /// Create a full-only set: a single glyph whose presence count is the
    /// rating (`full == empty`, no half glyph).
    pub fn full_only(glyph: &str) -> Self {
        Self::new(glyph, glyph, None)
    }

    /// Returns `true` if this set cannot express "empty" or "half" slots.
    ///
    /// Full-only sets have special rules everywhere: a zero rating is
    /// unrepresentable, writes never pad with empty glyphs, and the
    /// comment-fraction annotation is the only format ever auto-written.
    pub fn is_full_only(&self) -> bool {
        self.half.is_none() && self.full == self.empty
    }

    /// Returns `true` if this set can express half steps.
    pub fn supports_half(&self) -> bool {
        self.half.is_some()
    }
}

/// Errors produced while building a [`SymbolCatalog`].
#[derive(Debug)]
pub enum CatalogError {
    /// A symbol set has an empty `full` glyph.
    EmptyFullGlyph {
        /// Index of the offending set in the input list.
        index: usize,
    },
    /// The generated matching pattern failed to compile.
    InvalidPattern {
        /// Index of the offending set in the input list.
        index: usize,
        /// The underlying regex error.
        source: regex::Error,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFullGlyph { index } => {
                write!(f, "symbol set {} has an empty full glyph", index)
            }
            Self::InvalidPattern { index, source } => {
                write!(f, "symbol set {} produced an invalid pattern: {}", index, source)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// The built-in symbol sets, in matching priority order.
///
/// Stars, four-pointed stars, moon phases, circles, squares, triangles, the
/// heart family, and the progress-bar alphabets. Some glyphs repeat across
/// sets (e.g. `○` as the empty glyph of two sets); order decides.
pub fn base_symbol_sets() -> Vec<SymbolSet> {
    vec![
        SymbolSet::new("★", "☆", None),
        SymbolSet::new("✦", "✧", None),
        SymbolSet::new("🌕", "🌑", Some("🌗")),
        SymbolSet::new("●", "○", Some("◐")),
        SymbolSet::new("■", "□", Some("◧")),
        SymbolSet::new("▲", "△", None),
        // Hearts share the white heart as the empty glyph.
        SymbolSet::new("❤️", "🤍", None),
        SymbolSet::new("🧡", "🤍", None),
        SymbolSet::new("💛", "🤍", None),
        SymbolSet::new("💚", "🤍", None),
        SymbolSet::new("💙", "🤍", None),
        SymbolSet::new("💜", "🤍", None),
        SymbolSet::new("🖤", "🤍", None),
        SymbolSet::new("🤎", "🤍", None),
        // Progress-bar alphabets.
        SymbolSet::new("█", "▁", None),
        SymbolSet::new("⣿", "⣀", Some("⡇")),
        SymbolSet::new("⬤", "○", None),
        SymbolSet::new("■", "□", None),
        SymbolSet::new("▰", "▱", None),
        SymbolSet::new("◼", "▭", None),
        SymbolSet::new("▮", "▯", None),
        SymbolSet::new("⬤", "◯", None),
        SymbolSet::new("⚫", "⚪", None),
        SymbolSet::new("█", "░", None),
    ]
}

/// User-facing configuration: the emoji glyphs recognized as full-only
/// rating symbols, in addition to the built-in sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingsSettings {
    /// Each grapheme cluster in this string becomes one full-only symbol set.
    pub supported_emojis: String,
}

impl Default for RatingsSettings {
    fn default() -> Self {
        Self {
            supported_emojis: "🎥🏆⭐💎🔥⚡🎯🚀💰🎖️".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledSet {
    pub(crate) set: SymbolSet,
    pub(crate) regex: Regex,
}

/// An ordered, compiled collection of symbol sets.
///
/// Cloning is cheap; replace the whole catalog via [`SymbolCatalog::new`] or
/// [`SymbolCatalog::from_settings`] when configuration changes.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    sets: Arc<Vec<CompiledSet>>,
}

impl SymbolCatalog {
    /// Build a catalog from an ordered list of symbol sets.
    ///
    /// Fails on the first malformed set (empty `full` glyph); validating here
    /// keeps scan paths infallible.
    pub fn new(sets: Vec<SymbolSet>) -> Result<Self, CatalogError> {
        let mut compiled = Vec::with_capacity(sets.len());
        for (index, set) in sets.into_iter().enumerate() {
            let regex = compile_set_pattern(&set, index)?;
            compiled.push(CompiledSet { set, regex });
        }
        Ok(Self {
            sets: Arc::new(compiled),
        })
    }

    /// Build a catalog from the base sets plus the user-configured emoji,
    /// each appended as a full-only set.
    pub fn from_settings(settings: &RatingsSettings) -> Result<Self, CatalogError> {
        let mut sets = base_symbol_sets();
        for glyph in settings.supported_emojis.graphemes(true) {
            if glyph.trim().is_empty() {
                continue;
            }
            sets.push(SymbolSet::full_only(glyph));
        }
        log::debug!(
            "built symbol catalog from settings: {} sets ({} user emoji)",
            sets.len(),
            sets.len() - base_symbol_sets().len()
        );
        Self::new(sets)
    }

    /// The symbol sets in matching priority order.
    pub fn symbol_sets(&self) -> impl Iterator<Item = &SymbolSet> {
        self.sets.iter().map(|c| &c.set)
    }

    /// Number of symbol sets in the catalog.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if the catalog has no symbol sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub(crate) fn compiled(&self) -> &[CompiledSet] {
        &self.sets
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::new(base_symbol_sets()).expect("base symbol sets always compile")
    }
}

/// Build the matching regex for one set: an escaped alternation of its
/// glyphs, repeated one or more times.
///
/// An alternation, never a bracket class: multi-codepoint glyphs (flags, ZWJ
/// emoji, variation selectors) break apart inside a character class.
fn compile_set_pattern(set: &SymbolSet, index: usize) -> Result<Regex, CatalogError> {
    if set.full.is_empty() {
        return Err(CatalogError::EmptyFullGlyph { index });
    }

    let mut glyphs: Vec<&str> = vec![&set.full];
    if !set.empty.is_empty() && !glyphs.contains(&set.empty.as_str()) {
        glyphs.push(&set.empty);
    }
    if let Some(half) = &set.half {
        if !glyphs.contains(&half.as_str()) {
            glyphs.push(half);
        }
    }

    let alternation = glyphs
        .iter()
        .map(|g| regex::escape(g))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?:{})+", alternation))
        .map_err(|source| CatalogError::InvalidPattern { index, source })
}
