mod common;

use common::{ink, MockOracle};
use glyph_bounds::{
    BoundsRect, ExtremePair, GlyphExtremeScanner, GlyphMetric, OracleError, ShapingOracle,
    DEFAULT_CANDIDATES,
};

fn agx() -> MockOracle {
    MockOracle::new()
        .with_glyph('A', 12.0, ink(0.0, 10.0))
        .with_glyph('g', 9.0, ink(-6.0, 14.0))
        .with_glyph('x', 9.0, ink(0.0, 5.0))
}

#[test]
fn finds_top_and_bottom_most() {
    let oracle = agx();
    let font = oracle.font();
    let pair = glyph_bounds::scan(&oracle, &font, "Agx".chars());
    assert_eq!(pair.top(), ('A', 10.0));
    assert_eq!(pair.bottom(), ('g', 6.0));
    assert_eq!(pair.bottom_most.ascent_above_baseline, 8.0);
}

#[test]
fn extremes_dominate_every_candidate() {
    let oracle = MockOracle::new()
        .with_glyph('f', 10.0, ink(-4.0, 30.0))
        .with_glyph('j', 6.0, ink(-9.0, 25.0))
        .with_glyph('Q', 14.0, ink(-3.0, 21.0))
        .with_glyph('l', 5.0, ink(0.0, 24.0))
        .with_glyph('.', 4.0, ink(0.0, 2.0));
    let font = oracle.font();
    let scanner = GlyphExtremeScanner::new(&oracle);
    let report = scanner.scan_detailed(&font, "fjQl.".chars());

    assert_eq!(report.metrics.len(), 5);
    for metric in &report.metrics {
        assert!(report.extremes.top_most.ascent_above_baseline >= metric.ascent_above_baseline);
        assert!(report.extremes.bottom_most.descent_below_baseline >= metric.descent_below_baseline);
    }
    assert_eq!(report.extremes.top(), ('f', 26.0));
    assert_eq!(report.extremes.bottom(), ('j', 9.0));
}

#[test]
fn first_character_wins_ties() {
    let oracle = MockOracle::new()
        .with_glyph('b', 10.0, ink(0.0, 20.0))
        .with_glyph('d', 10.0, ink(0.0, 20.0))
        .with_glyph('p', 10.0, ink(-5.0, 15.0))
        .with_glyph('q', 10.0, ink(-5.0, 15.0));
    let font = oracle.font();

    let pair = glyph_bounds::scan(&oracle, &font, "bdpq".chars());
    assert_eq!(pair.top().0, 'b');
    assert_eq!(pair.bottom().0, 'p');

    let pair = glyph_bounds::scan(&oracle, &font, "qpdb".chars());
    assert_eq!(pair.top().0, 'd');
    assert_eq!(pair.bottom().0, 'q');
}

#[test]
fn empty_candidates_give_floor() {
    let oracle = agx();
    let font = oracle.font();
    let pair = glyph_bounds::scan(&oracle, &font, "".chars());
    assert_eq!(pair, ExtremePair::default());
    assert_eq!(pair.top(), (' ', 0.0));
    assert_eq!(pair.bottom(), (' ', 0.0));
}

#[test]
fn flat_candidates_give_floor() {
    let oracle = MockOracle::new()
        .with_glyph('-', 8.0, BoundsRect::new(1.0, 0.0, 6.0, 0.0))
        .with_glyph(' ', 6.0, BoundsRect::ZERO);
    let font = oracle.font();
    let pair = glyph_bounds::scan(&oracle, &font, " -".chars());
    assert_eq!(pair.top(), (' ', 0.0));
    assert_eq!(pair.bottom(), (' ', 0.0));
}

#[test]
fn negative_ascent_never_wins() {
    // a glyph hanging entirely below the baseline
    let oracle = MockOracle::new().with_glyph('_', 10.0, ink(-4.0, 1.5));
    let font = oracle.font();
    let pair = glyph_bounds::scan(&oracle, &font, "_".chars());
    assert_eq!(pair.top(), (' ', 0.0));
    assert_eq!(pair.bottom(), ('_', 4.0));
}

#[test]
fn failing_character_is_skipped() {
    let oracle = agx()
        .with_glyph('Ж', 12.0, ink(0.0, 40.0))
        .failing_on('Ж');
    let font = oracle.font();
    let report = GlyphExtremeScanner::new(&oracle).scan_detailed(&font, "AЖgx".chars());

    assert_eq!(report.extremes.top(), ('A', 10.0));
    assert_eq!(report.extremes.bottom(), ('g', 6.0));
    assert_eq!(report.metrics.len(), 3);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, 'Ж');
    assert!(matches!(
        report.skipped[0].1,
        OracleError::QueryFailed { .. }
    ));
}

#[test]
fn measures_single_character() {
    let oracle = agx();
    let font = oracle.font();
    let metric = GlyphExtremeScanner::new(&oracle).measure(&font, 'g').unwrap();
    assert_eq!(
        metric,
        GlyphMetric {
            character: 'g',
            ascent_above_baseline: 8.0,
            descent_below_baseline: 6.0,
        }
    );
}

#[test]
fn default_candidates_cover_ascii() {
    assert_eq!(DEFAULT_CANDIDATES.chars().count(), 93);
    assert!(DEFAULT_CANDIDATES.is_ascii());
    assert!(!DEFAULT_CANDIDATES.contains(' '));
}

#[test]
fn unknown_font_is_not_substituted() {
    let oracle = agx();
    let err = oracle.create_font("Zapfino", 24.0).unwrap_err();
    assert!(matches!(err, OracleError::FontNotFound { name } if name == "Zapfino"));
}

#[test]
fn append_skips_present_and_floor() {
    let oracle = agx();
    let font = oracle.font();
    let pair = glyph_bounds::scan(&oracle, &font, "Agx".chars());

    assert_eq!(pair.append_to("Hello World"), "Hello World | Ag");
    assert_eq!(pair.append_to("Gag"), "Gag | A");
    assert_eq!(pair.append_to("Again"), "Again");
    assert_eq!(ExtremePair::default().append_to("Hello"), "Hello");
}
