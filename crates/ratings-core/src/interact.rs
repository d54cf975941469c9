//! Interaction state machine: pointer/touch/keyboard editing of rating runs.
//!
//! The machine is deliberately small: **Idle** (no open region) and
//! **Previewing** (exactly one open [`RatingRegion`] whose `live_rating`
//! follows the pointer). Committing writes one replacement through the host
//! and returns to Idle; cancelling returns to Idle with the document
//! untouched. Opening a new region implicitly cancels the previous one, and
//! any document change invalidates the open region outright — derived state
//! is recomputed, never patched.

use crate::catalog::SymbolCatalog;
use crate::codec::{Replacement, build_replacement, render_symbols};
use crate::host::{HostEditor, ScreenRect};
use crate::matcher::RatingMatch;
use crate::resolve::scan_line;

/// Input device class, adapted at the host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// A mouse device; leaving the region without releasing cancels.
    Mouse,
    /// A touch contact; capture semantics, drags past the edge clamp.
    Touch,
    /// A unified pointer-events device; capture semantics like touch.
    Pointer,
}

/// A unified pointer/touch event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Which device produced the event.
    pub kind: PointerKind,
    /// Screen x coordinate.
    pub x: f64,
    /// Screen y coordinate.
    pub y: f64,
    /// Pointer/touch identifier, when the device provides one.
    pub id: Option<u64>,
}

impl PointerEvent {
    /// Convenience constructor for a mouse event.
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Mouse,
            x,
            y,
            id: None,
        }
    }

    /// Convenience constructor for a touch event.
    pub fn touch(x: f64, y: f64, id: u64) -> Self {
        Self {
            kind: PointerKind::Touch,
            x,
            y,
            id: Some(id),
        }
    }
}

/// Keyboard input relevant to an open rating region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Decrease by one step.
    ArrowLeft,
    /// Decrease by one step.
    ArrowDown,
    /// Increase by one step.
    ArrowRight,
    /// Increase by one step.
    ArrowUp,
    /// Jump to the minimum rating.
    Home,
    /// Jump to the maximum rating.
    End,
    /// Commit the live rating.
    Enter,
    /// Commit the live rating.
    Space,
    /// Cancel without committing.
    Escape,
}

/// The currently open editable rating instance. At most one exists.
#[derive(Debug, Clone)]
pub struct RatingRegion {
    /// The resolved match backing this region.
    pub target: RatingMatch,
    /// Document line the match sits on.
    pub line: usize,
    /// Screen extent of the symbol run; slot geometry divides this width.
    pub rect: ScreenRect,
    /// Screen extent of the full consumed span, annotation included; the
    /// region stays open while the pointer remains inside it.
    pub extent: ScreenRect,
    /// Number of rating slots (grapheme count of the run).
    pub slot_count: usize,
    /// The rating being previewed; follows the pointer, committed on release.
    pub live_rating: f64,
}

impl RatingRegion {
    /// The preview symbol string for the current live rating, for renderers.
    pub fn preview_symbols(&self) -> String {
        render_symbols(self.live_rating, self.slot_count, &self.target.symbol_set)
    }
}

/// Interaction lifecycle state.
#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    /// No open region.
    #[default]
    Idle,
    /// One region is open and its live rating follows the pointer.
    Previewing(RatingRegion),
}

/// The edit applied by a committed interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitEdit {
    /// Line the replacement was applied to.
    pub line: usize,
    /// The committed rating.
    pub new_rating: f64,
    /// The text replacement issued to the host.
    pub replacement: Replacement,
}

/// Map a horizontal position within a region to a candidate rating.
///
/// The region width divides into `slot_count` equal slots. Sets with a half
/// glyph snap to the half step on the left half of a slot; full-only sets
/// snap to whole steps with a floor of 1 (they cannot express zero). The
/// result is clamped to `[0, slot_count]` (or `[1, slot_count]` full-only).
pub fn rating_from_position(
    relative_x: f64,
    width: f64,
    slot_count: usize,
    supports_half: bool,
    full_only: bool,
) -> f64 {
    let floor = if full_only { 1.0 } else { 0.0 };
    if slot_count == 0 || width <= 0.0 {
        return floor;
    }

    let max = slot_count as f64;
    let slot_width = width / max;
    let clamped_x = relative_x.clamp(0.0, width);
    let index = (clamped_x / slot_width).floor().min(max - 1.0);
    let within = clamped_x / slot_width - index;

    let rating = if full_only {
        index + 1.0
    } else if supports_half && within < 0.5 {
        index + 0.5
    } else {
        index + 1.0
    };
    rating.clamp(floor, max)
}

/// Drives the interaction state machine against a host editor.
///
/// ```rust
/// use ratings_core::{GridHost, HostEditor, PointerEvent, RatingsController};
///
/// let host = GridHost::new("★★★☆☆ 3/5", 10.0, 20.0);
/// let mut controller = RatingsController::new(host);
///
/// controller.pointer_move(PointerEvent::mouse(5.0, 10.0)); // opens a region
/// controller.pointer_move(PointerEvent::mouse(45.0, 10.0)); // previews 5.0
/// let edit = controller.pointer_up(PointerEvent::mouse(45.0, 10.0)).unwrap();
/// assert_eq!(edit.new_rating, 5.0);
/// assert_eq!(controller.host().line_text(0).unwrap(), "★★★★★ 5/5");
/// ```
pub struct RatingsController<H: HostEditor> {
    host: H,
    catalog: SymbolCatalog,
    state: InteractionState,
}

impl<H: HostEditor> RatingsController<H> {
    /// Create a controller with the default symbol catalog.
    pub fn new(host: H) -> Self {
        Self::with_catalog(host, SymbolCatalog::default())
    }

    /// Create a controller with an explicit catalog.
    pub fn with_catalog(host: H, catalog: SymbolCatalog) -> Self {
        Self {
            host,
            catalog,
            state: InteractionState::Idle,
        }
    }

    /// The embedded host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the embedded host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The active symbol catalog.
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// Replace the catalog wholesale. Cancels any open region, since it was
    /// derived from the old catalog.
    pub fn set_catalog(&mut self, catalog: SymbolCatalog) {
        self.catalog = catalog;
        self.state = InteractionState::Idle;
    }

    /// Current interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The open region, if any.
    pub fn open_region(&self) -> Option<&RatingRegion> {
        match &self.state {
            InteractionState::Previewing(region) => Some(region),
            InteractionState::Idle => None,
        }
    }

    /// The document changed underneath us: drop all derived state.
    pub fn document_changed(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Pointer/touch movement. Opens a region when the pointer enters a
    /// resolved match, updates the live rating while inside one, and (for
    /// mouse devices) cancels when the pointer leaves.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        if let InteractionState::Previewing(region) = &mut self.state {
            let inside = region.extent.contains(event.x, event.y);
            // Touch and pointer devices hold capture: drags past the visual
            // bounds keep previewing with a clamped position.
            if inside || matches!(event.kind, PointerKind::Touch | PointerKind::Pointer) {
                region.live_rating = region_rating_at(region, event.x);
                return;
            }
            // Mouse without capture: leaving the region cancels the preview.
            log::debug!("pointer left region, cancelling preview");
            self.state = InteractionState::Idle;
        }
        self.try_open(event);
    }

    /// Pointer/touch press. Opens the region under the press, implicitly
    /// cancelling any previously open one.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        self.try_open(event);
    }

    /// Pointer/touch release: commits the live rating of the open region.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Option<CommitEdit> {
        let InteractionState::Previewing(mut region) =
            std::mem::take(&mut self.state)
        else {
            return None;
        };
        if region.extent.contains(event.x, event.y)
            || matches!(event.kind, PointerKind::Touch | PointerKind::Pointer)
        {
            region.live_rating = region_rating_at(&region, event.x);
        }
        Some(self.commit(region))
    }

    /// Keyboard input for the open region. Arrows step the live rating,
    /// Home/End jump, Enter/Space commit, Escape cancels. No-ops when Idle.
    pub fn key_input(&mut self, key: KeyInput) -> Option<CommitEdit> {
        match key {
            KeyInput::Enter | KeyInput::Space => {
                let InteractionState::Previewing(region) = std::mem::take(&mut self.state)
                else {
                    return None;
                };
                return Some(self.commit(region));
            }
            KeyInput::Escape => {
                self.state = InteractionState::Idle;
                return None;
            }
            _ => {}
        }

        let InteractionState::Previewing(region) = &mut self.state else {
            return None;
        };
        let set = &region.target.symbol_set;
        let full_only = set.is_full_only();
        let step = if !full_only && set.supports_half() {
            0.5
        } else {
            1.0
        };
        let floor = if full_only { 1.0 } else { 0.0 };
        let max = region.slot_count as f64;

        match key {
            KeyInput::ArrowLeft | KeyInput::ArrowDown => {
                region.live_rating = (region.live_rating - step).max(floor);
            }
            KeyInput::ArrowRight | KeyInput::ArrowUp => {
                region.live_rating = (region.live_rating + step).min(max);
            }
            KeyInput::Home => region.live_rating = floor,
            KeyInput::End => region.live_rating = max,
            KeyInput::Enter | KeyInput::Space | KeyInput::Escape => {}
        }
        None
    }

    /// Open the region containing `offset` on `line`, if any (the keyboard
    /// focus path). Returns `true` when a region was opened.
    pub fn open_at(&mut self, line: usize, offset: usize) -> bool {
        let Some(text) = self.host.line_text(line) else {
            return false;
        };
        for m in scan_line(&text, &self.catalog) {
            if offset >= m.start && offset <= m.span_end() {
                if let Some(region) = self.region_for(line, m) {
                    self.state = InteractionState::Previewing(region);
                    return true;
                }
            }
        }
        false
    }

    fn try_open(&mut self, event: PointerEvent) -> bool {
        // Coordinate-mapping failures no-op the event by design.
        let Some(pos) = self.host.position_at_coords(event.x, event.y) else {
            return false;
        };
        let Some(text) = self.host.line_text(pos.line) else {
            return false;
        };

        for m in scan_line(&text, &self.catalog) {
            if pos.offset < m.start || pos.offset > m.span_end() {
                continue;
            }
            // Already previewing this exact run: keep its live rating.
            if let InteractionState::Previewing(open) = &self.state {
                if open.line == pos.line && open.target.start == m.start {
                    return true;
                }
            }
            if let Some(region) = self.region_for(pos.line, m) {
                log::debug!(
                    "opened rating region at line {} [{}, {}) rating={}",
                    region.line,
                    region.target.start,
                    region.target.end,
                    region.live_rating
                );
                self.state = InteractionState::Previewing(region);
                return true;
            }
        }
        false
    }

    fn region_for(&self, line: usize, m: RatingMatch) -> Option<RatingRegion> {
        let start_rect = self.host.coords_at_position(line, m.start)?;
        let end_rect = self.host.coords_at_position(line, m.end)?;
        let span_rect = self.host.coords_at_position(line, m.span_end())?;
        let rect = start_rect.union(&end_rect);
        let extent = start_rect.union(&span_rect);
        Some(RatingRegion {
            line,
            rect,
            extent,
            slot_count: m.slot_count(),
            live_rating: m.rating,
            target: m,
        })
    }

    fn commit(&mut self, region: RatingRegion) -> CommitEdit {
        let replacement = build_replacement(&region.target, region.live_rating);
        self.host.replace_range(
            region.line,
            replacement.start,
            replacement.end,
            &replacement.text,
        );
        log::info!(
            "committed rating {} -> {} on line {}",
            region.target.rating,
            region.live_rating,
            region.line
        );
        // The document changed; all derived state is stale.
        self.state = InteractionState::Idle;
        CommitEdit {
            line: region.line,
            new_rating: region.live_rating,
            replacement,
        }
    }
}

/// Live rating for a pointer at screen `x` within `region`.
fn region_rating_at(region: &RatingRegion, x: f64) -> f64 {
    let set = &region.target.symbol_set;
    let full_only = set.is_full_only();
    rating_from_position(
        x - region.rect.left,
        region.rect.width(),
        region.slot_count,
        set.supports_half() && !full_only,
        full_only,
    )
}
