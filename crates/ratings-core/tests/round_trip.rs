use ratings_core::{
    AnnotationFormat, RatingsSettings, SymbolCatalog, base_symbol_sets, build_replacement,
    compute_rating, format_annotation, grapheme_len, render_symbols, scan_line,
};

/// Splice a replacement into `line` by character offsets.
fn apply(line: &str, new_rating: f64) -> String {
    let catalog = SymbolCatalog::from_settings(&RatingsSettings::default()).unwrap();
    let matches = scan_line(line, &catalog);
    assert_eq!(matches.len(), 1, "{line}");
    let r = build_replacement(&matches[0], new_rating);

    let chars: Vec<char> = line.chars().collect();
    let mut out: String = chars[..r.start].iter().collect();
    out.push_str(&r.text);
    out.extend(&chars[r.end..]);
    out
}

#[test]
fn test_render_then_compute_is_identity_for_every_base_set() {
    let slots = 5;
    for set in base_symbol_sets() {
        let step = if set.supports_half() { 1 } else { 2 };
        for half_steps in (0..=(slots * 2)).step_by(step) {
            let rating = half_steps as f64 / 2.0;
            let rendered = render_symbols(rating, slots, &set);
            assert_eq!(grapheme_len(&rendered), slots, "{rendered}");
            assert_eq!(compute_rating(&rendered, &set), rating, "{rendered}");
        }
    }
}

#[test]
fn test_scan_round_trip_preserves_rating_for_every_base_set() {
    let slots = 5;
    for set in base_symbol_sets() {
        let catalog = SymbolCatalog::new(vec![set.clone()]).unwrap();
        let step = if set.supports_half() { 1 } else { 2 };
        for half_steps in (0..=(slots * 2)).step_by(step) {
            let rating = half_steps as f64 / 2.0;
            let label = format_annotation(
                AnnotationFormat::Fraction,
                rating,
                slots,
                slots as u32,
                set.supports_half(),
                false,
            );
            let line = format!("{}{label}", render_symbols(rating, slots, &set));

            let matches = scan_line(&line, &catalog);
            assert_eq!(matches.len(), 1, "{line}");
            assert_eq!(matches[0].rating, rating, "{line}");
            assert_eq!(matches[0].slot_count(), slots, "{line}");
            let ann = matches[0].annotation.as_ref().unwrap();
            assert_eq!(ann.numerator, rating, "{line}");
            assert_eq!(ann.denominator, slots as u32, "{line}");
        }
    }
}

#[test]
fn test_commit_preserves_the_annotation_format() {
    assert_eq!(apply("★★★☆☆ 3/5", 4.0), "★★★★☆ 4/5");
    assert_eq!(apply("★★★☆☆ (3/5)", 2.0), "★★☆☆☆ (2/5)");
    assert_eq!(apply("★★★☆☆ 60%", 5.0), "★★★★★ 100%");
    assert_eq!(apply("★★★☆☆ (60%)", 1.0), "★☆☆☆☆ (20%)");
}

#[test]
fn test_commit_preserves_surrounding_text() {
    assert_eq!(
        apply("coffee ★★★☆☆ 3/5 at the corner shop", 4.0),
        "coffee ★★★★☆ 4/5 at the corner shop"
    );
    assert_eq!(apply("●●◐○○ 2.5/5 tasty", 4.5), "●●●●◐ 4.5/5 tasty");
}

#[test]
fn test_full_only_comment_round_trip_and_elision() {
    // The hidden denominator survives an imperfect commit...
    assert_eq!(apply("🔥🔥🔥 <!-- 3/5 -->", 4.0), "🔥🔥🔥🔥<!-- 4/5 -->");
    // ...and disappears at a perfect score, where it adds nothing.
    assert_eq!(apply("🔥🔥🔥 <!-- 3/5 -->", 5.0), "🔥🔥🔥🔥🔥");
    // Without any annotation the denominator is unknown; none is invented.
    assert_eq!(apply("🔥🔥🔥🔥", 2.0), "🔥🔥");
}
