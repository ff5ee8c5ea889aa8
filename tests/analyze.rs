use once_cell::sync::Lazy;
use styledna::*;

const FEATHER_CLOCK: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><path d="M12 6v6l4 2"/></svg>"#;

static FEATHER: Lazy<Vec<Icon>> = Lazy::new(|| {
    vec![
        Icon::new(FEATHER_CLOCK),
        Icon::new(r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M18.36 6.64a9 9 0 11-12.73 0"/><line x1="12" y1="2" x2="12" y2="12"/></svg>"#),
        Icon::new(r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="3" y="3" width="18" height="18" rx="2" ry="2"/><path d="M9 3v18"/></svg>"#),
        Icon::new(r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="3"/><path d="M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8z"/></svg>"#),
        Icon::new(r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><path d="M8 14s1.5 2 4 2 4-2 4-2"/></svg>"#),
    ]
});

fn uniform(count: usize) -> Vec<Icon> {
    vec![Icon::new(FEATHER_CLOCK); count]
}

#[test]
fn empty_corpus() {
    let result = analyze(&[], &AnalyzerOptions::default());
    assert!(matches!(result, Err(Error::EmptyCorpus)));
}

#[test]
fn outline_corpus() {
    let summary = analyze(&FEATHER, &AnalyzerOptions::default()).unwrap();
    assert_eq!(summary.stroke_style, StrokeStyle::Outline);
    assert_eq!(summary.fill_usage, FillUsage::None);
    assert_eq!(summary.avg_stroke_width, 2.0);
    assert_eq!(summary.stroke_cap, StrokeCap::Round);
    assert_eq!(summary.stroke_join, StrokeJoin::Round);
    assert_eq!(summary.avg_corner_radius, 2.0);
    assert_eq!(summary.dominant_shapes, "circles and curves");
    assert_eq!(summary.detail_level, DetailLevel::Low);
    assert_eq!(summary.target_grid, Some(24.0));
    assert_eq!(summary.confidence_score, 0.75);
}

#[test]
fn uniform_corpus() {
    let summary = analyze(&uniform(3), &AnalyzerOptions::default()).unwrap();
    assert_eq!(summary.stroke_style, StrokeStyle::Outline);
    assert_eq!(summary.fill_usage, FillUsage::None);
    assert_eq!(summary.avg_stroke_width, 2.0);
    assert_eq!(summary.dominant_shapes, "circles and straight lines");
}

#[test]
fn confidence_grows_with_corpus_size() {
    let opt = AnalyzerOptions::default();
    let scores: Vec<f64> = (1..=15)
        .map(|n| analyze(&uniform(n), &opt).unwrap().confidence_score)
        .collect();

    for pair in scores[..10].windows(2) {
        assert!(pair[0] < pair[1], "{:?}", scores);
    }

    for score in &scores[9..] {
        assert_eq!(*score, 1.0);
    }
}

#[test]
fn confidence_penalties() {
    let opt = AnalyzerOptions::default();

    // No stroke widths at all.
    let filled = vec![Icon::new("<svg viewBox='0 0 24 24'><path d='M0 0h4v4z'/></svg>"); 10];
    assert_eq!(analyze(&filled, &opt).unwrap().confidence_score, 0.7);

    // Half of icons are filled.
    let mut mixed = uniform(5);
    mixed.extend(vec![Icon::new("<svg stroke-width='2'><path d='M0 0h4v4z'/></svg>"); 5]);
    let summary = analyze(&mixed, &opt).unwrap();
    assert_eq!(summary.stroke_style, StrokeStyle::Mixed);
    assert_eq!(summary.confidence_score, 0.5);
}

#[test]
fn deterministic() {
    let opt = AnalyzerOptions::default();
    assert_eq!(analyze(&FEATHER, &opt).unwrap(), analyze(&FEATHER, &opt).unwrap());
}

#[test]
fn median_resists_outliers() {
    let icons: Vec<Icon> = ["2", "2", "2", "10", "1.5"]
        .iter()
        .map(|w| Icon::new(format!("<svg stroke='black' fill='none' stroke-width='{}'/>", w)))
        .collect();
    let summary = analyze(&icons, &AnalyzerOptions::default()).unwrap();
    assert_eq!(summary.avg_stroke_width, 2.0);
}

#[test]
fn discrete_stroke_widths() {
    let icons = vec![Icon::new("<svg stroke='black' fill='none' stroke-width='1.5'/>")];
    let summary = analyze(&icons, &AnalyzerOptions::default()).unwrap();
    assert_eq!(summary.avg_stroke_width, 1.5);

    let summary = analyze(&icons, &AnalyzerOptions::discrete()).unwrap();
    assert_eq!(summary.avg_stroke_width, 2.0);
}

#[test]
fn defaults() {
    let icons = vec![Icon::new("<svg><path d='M0 0'/></svg>")];
    let summary = analyze(&icons, &AnalyzerOptions::default()).unwrap();
    assert_eq!(summary.avg_stroke_width, 2.0);
    assert_eq!(summary.avg_corner_radius, 3.0);
    assert_eq!(summary.stroke_cap, StrokeCap::Round);
    assert_eq!(summary.stroke_join, StrokeJoin::Round);
    assert_eq!(summary.stroke_style, StrokeStyle::Filled);
    assert_eq!(summary.fill_usage, FillUsage::Solid);
    assert_eq!(summary.target_grid, None);
}

#[test]
fn grid_is_snapped() {
    let icons = vec![
        Icon::new("<svg viewBox='0 0 25 25'/>"),
        Icon::new("<svg viewBox='0 0 25 25'/>"),
        Icon::new("<svg viewBox='0 0 48 48'/>"),
    ];
    let summary = analyze(&icons, &AnalyzerOptions::default()).unwrap();
    assert_eq!(summary.target_grid, Some(24.0));
}

#[test]
fn metadata_overrides_markup() {
    let icons: Vec<Icon> = uniform(2)
        .into_iter()
        .map(|icon| icon.with_render_style(RenderStyle::Fill))
        .collect();
    let summary = analyze(&icons, &AnalyzerOptions::default()).unwrap();
    assert_eq!(summary.stroke_style, StrokeStyle::Filled);
}

#[test]
fn broken_icons_are_skipped() {
    let mut icons = uniform(2);
    icons.push(Icon::new("<svg><path></svg>"));
    let summary = analyze(&icons, &AnalyzerOptions::default()).unwrap();
    assert_eq!(summary.stroke_style, StrokeStyle::Outline);

    let broken = vec![Icon::new("not an svg")];
    let result = analyze(&broken, &AnalyzerOptions::default());
    assert!(matches!(result, Err(Error::EmptyCorpus)));
}

#[test]
fn parallel_scans() {
    let opt = &AnalyzerOptions::default();
    let scans: Vec<IconScan> = std::thread::scope(|s| {
        let handles: Vec<_> = FEATHER
            .iter()
            .map(|icon| s.spawn(move || scan_icon(icon, opt).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(summarize(&scans, opt).unwrap(), analyze(&FEATHER, opt).unwrap());
}
