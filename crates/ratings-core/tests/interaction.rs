use ratings_core::{
    GridHost, HostEditor, KeyInput, PointerEvent, RatingsController, RatingsSettings,
    SymbolCatalog,
};

fn controller(text: &str) -> RatingsController<GridHost> {
    RatingsController::new(GridHost::new(text, 10.0, 20.0))
}

#[test]
fn test_mouse_drag_lifecycle_on_a_multi_line_document() {
    let mut c = controller("# Review\nservice ★★★☆☆ 3/5\nfood ●●◐○○");

    // Hover over the stars on line 1 ("service " is 8 cells).
    c.pointer_move(PointerEvent::mouse(85.0, 30.0));
    let region = c.open_region().expect("region open");
    assert_eq!(region.line, 1);
    assert_eq!(region.live_rating, 3.0);

    // Drag to the last slot and release.
    c.pointer_move(PointerEvent::mouse(125.0, 30.0));
    assert_eq!(c.open_region().unwrap().live_rating, 5.0);
    assert_eq!(c.open_region().unwrap().preview_symbols(), "★★★★★");

    let edit = c.pointer_up(PointerEvent::mouse(125.0, 30.0)).unwrap();
    assert_eq!(edit.new_rating, 5.0);
    assert_eq!(c.host().line_text(1).unwrap(), "service ★★★★★ 5/5");
    // Other lines are untouched.
    assert_eq!(c.host().line_text(0).unwrap(), "# Review");
    assert_eq!(c.host().line_text(2).unwrap(), "food ●●◐○○");
    assert!(c.open_region().is_none());
}

#[test]
fn test_percent_annotation_tracks_the_committed_rating() {
    let mut c = controller("★★★☆☆ (60%)");
    c.pointer_down(PointerEvent::mouse(15.0, 10.0));
    let edit = c.pointer_up(PointerEvent::mouse(15.0, 10.0)).unwrap();
    assert_eq!(edit.new_rating, 2.0);
    assert_eq!(c.host().line_text(0).unwrap(), "★★☆☆☆ (40%)");
}

#[test]
fn test_touch_drag_past_the_edge_commits_the_clamped_rating() {
    let mut c = controller("●●◐○○ 2.5/5");
    c.pointer_down(PointerEvent::touch(5.0, 10.0, 7));
    c.pointer_move(PointerEvent::touch(-200.0, 10.0, 7));
    // Clamped to the left edge: the left half of slot 0, a half step.
    assert_eq!(c.open_region().unwrap().live_rating, 0.5);

    let edit = c.pointer_up(PointerEvent::touch(-200.0, 10.0, 7)).unwrap();
    assert_eq!(edit.new_rating, 0.5);
    assert_eq!(c.host().line_text(0).unwrap(), "◐○○○○ 0.5/5");
}

#[test]
fn test_keyboard_editing_of_a_double_width_run() {
    // Moon glyphs are double-width on the grid; keyboard paths never touch
    // geometry, only the match itself.
    let mut c = controller("🌕🌕🌗🌑🌑 50%");
    assert!(c.open_at(0, 3));
    assert_eq!(c.open_region().unwrap().live_rating, 2.5);

    c.key_input(KeyInput::ArrowRight);
    let edit = c.key_input(KeyInput::Space).unwrap();
    assert_eq!(edit.new_rating, 3.0);
    assert_eq!(c.host().line_text(0).unwrap(), "🌕🌕🌕🌑🌑 60%");
}

#[test]
fn test_full_only_interaction_respects_the_floor() {
    let catalog = SymbolCatalog::from_settings(&RatingsSettings::default()).unwrap();
    let host = GridHost::new("🔥🔥🔥🔥 <!-- 4/5 -->", 10.0, 20.0);
    let mut c = RatingsController::with_catalog(host, catalog);

    assert!(c.open_at(0, 0));
    c.key_input(KeyInput::Home);
    // Full-only sets cannot express zero.
    assert_eq!(c.open_region().unwrap().live_rating, 1.0);

    let edit = c.key_input(KeyInput::Enter).unwrap();
    assert_eq!(edit.new_rating, 1.0);
    assert_eq!(c.host().line_text(0).unwrap(), "🔥<!-- 1/5 -->");
}

#[test]
fn test_cancel_paths_leave_the_document_alone() {
    let original = "note ★★★☆☆ 3/5";
    let mut c = controller(original);

    // Mouse leave.
    c.pointer_move(PointerEvent::mouse(55.0, 10.0));
    assert!(c.open_region().is_some());
    c.pointer_move(PointerEvent::mouse(55.0, 500.0));
    assert!(c.open_region().is_none());

    // Escape.
    assert!(c.open_at(0, 6));
    c.key_input(KeyInput::ArrowUp);
    assert!(c.key_input(KeyInput::Escape).is_none());
    assert!(c.open_region().is_none());

    // External document change.
    assert!(c.open_at(0, 6));
    c.document_changed();
    assert!(c.key_input(KeyInput::Enter).is_none());

    assert_eq!(c.host().line_text(0).unwrap(), original);
}

#[test]
fn test_consecutive_edits_on_the_same_run() {
    let mut c = controller("★★★☆☆ 3/5");

    c.pointer_down(PointerEvent::mouse(45.0, 10.0));
    c.pointer_up(PointerEvent::mouse(45.0, 10.0)).unwrap();
    assert_eq!(c.host().line_text(0).unwrap(), "★★★★★ 5/5");

    // The committed text is itself a valid match; edit it again.
    c.pointer_down(PointerEvent::mouse(5.0, 10.0));
    let edit = c.pointer_up(PointerEvent::mouse(5.0, 10.0)).unwrap();
    assert_eq!(edit.new_rating, 1.0);
    assert_eq!(c.host().line_text(0).unwrap(), "★☆☆☆☆ 1/5");
}
