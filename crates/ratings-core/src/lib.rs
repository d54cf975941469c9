#![warn(missing_docs)]
//! Ratings Core - Headless Inline-Rating Engine
//!
//! # Overview
//!
//! `ratings-core` detects rating glyph runs (★★★☆☆, ●●◐○○, progress blocks,
//! emoji) embedded in plain text, computes their numeric value, and turns
//! pointer/touch/keyboard interaction into precise in-place text edits. It is
//! headless: rendering, settings storage, and the document itself belong to
//! the embedding editor, which the engine reaches only through the
//! [`HostEditor`] trait.
//!
//! # Core Features
//!
//! - **Unicode-correct matching**: symbol runs are matched per grapheme
//!   cluster, so ZWJ emoji and variation-selector glyphs count as one symbol
//! - **Annotation round-trips**: `3/5`, `(3/5)`, `60%`, `(60%)`, and the
//!   hidden `<!-- 3/5 -->` comment form are parsed and re-emitted
//!   format-preservingly
//! - **Deterministic resolution**: overlapping candidate readings resolve by
//!   position, then catalog order
//! - **Interactive editing**: a two-state machine (Idle/Previewing) maps
//!   pointer position to half-step-snapped ratings and commits exactly one
//!   text replacement
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  RatingsController (interaction)            │  ← talks to the HostEditor
//! ├─────────────────────────────────────────────┤
//! │  Match Resolution (overlap, cursor)         │
//! ├─────────────────────────────────────────────┤
//! │  Codec (rating → symbols + annotation)      │
//! ├─────────────────────────────────────────────┤
//! │  Annotation Parser │ Pattern Matcher        │
//! ├─────────────────────────────────────────────┤
//! │  Symbol Catalog (compiled symbol sets)      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Scanning text
//!
//! ```rust
//! use ratings_core::{SymbolCatalog, scan_line};
//!
//! let catalog = SymbolCatalog::default();
//! let matches = scan_line("Coffee: ★★★☆☆ 3/5", &catalog);
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].pattern, "★★★☆☆");
//! assert_eq!(matches[0].rating, 3.0);
//! assert_eq!(matches[0].annotation.as_ref().unwrap().denominator, 5);
//! ```
//!
//! ## Interactive editing
//!
//! ```rust
//! use ratings_core::{GridHost, HostEditor, PointerEvent, RatingsController};
//!
//! let host = GridHost::new("★★★☆☆ 3/5", 10.0, 20.0);
//! let mut controller = RatingsController::new(host);
//!
//! controller.pointer_move(PointerEvent::mouse(15.0, 10.0));
//! assert!(controller.open_region().is_some());
//!
//! let edit = controller.pointer_up(PointerEvent::mouse(15.0, 10.0)).unwrap();
//! assert_eq!(edit.new_rating, 2.0);
//! assert_eq!(controller.host().line_text(0).unwrap(), "★★☆☆☆ 2/5");
//! ```
//!
//! # Module Description
//!
//! - [`catalog`] - symbol sets and the compiled, swappable catalog
//! - [`matcher`] - locates rating runs ([`RatingMatch`])
//! - [`annotation`] - trailing rating-label parsing
//! - [`codec`] - rating → text rendering and replacement building
//! - [`resolve`] - overlap and cursor-adjacency resolution
//! - [`interact`] - the interaction state machine and controller
//! - [`host`] - the [`HostEditor`] contract and a text-grid reference host
//! - [`text`] - grapheme/char offset helpers
//!
//! # Offsets
//!
//! Every public offset is a character offset (Unicode scalar values).
//! Counting — ratings, run lengths, slot counts — uses extended grapheme
//! clusters, so a multi-codepoint emoji is one symbol.

pub mod annotation;
pub mod catalog;
pub mod codec;
pub mod host;
pub mod interact;
pub mod matcher;
pub mod resolve;
pub mod text;

pub use annotation::{Annotation, AnnotationFormat, parse_annotation};
pub use catalog::{CatalogError, RatingsSettings, SymbolCatalog, SymbolSet, base_symbol_sets};
pub use codec::{
    Replacement, build_replacement, format_annotation, render_symbols, render_symbols_for_disk,
};
pub use host::{GridHost, HostEditor, ScreenRect, TextPosition};
pub use interact::{
    CommitEdit, InteractionState, KeyInput, PointerEvent, PointerKind, RatingRegion,
    RatingsController, rating_from_position,
};
pub use matcher::{RatingMatch, compute_rating, find_matches};
pub use resolve::{resolve, resolve_for_editing, scan_line, scan_line_for_editing};
pub use text::{grapheme_len, grapheme_substring};
