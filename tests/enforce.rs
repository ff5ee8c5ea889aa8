use styledna::*;

const PAUSE: &str = r#"<svg viewBox="0 0 24 24"><path d="M6 19h4V5H6v14zm8-14v14h4V5h-4z" fill="black"/></svg>"#;

#[test]
fn filled_icon_against_feather() {
    let result = enforce(PAUSE, &EnforcementRules::feather());
    assert!(!result.passed);
    assert_eq!(result.score, 20);
    assert_eq!(result.errors(), 4);
    assert_eq!(result.warnings(), 0);

    let rules: Vec<Rule> = result.violations.iter().map(|v| v.rule).collect();
    assert_eq!(
        rules,
        vec![Rule::StrokeWidth, Rule::StrokeLinecap, Rule::StrokeLinejoin, Rule::Fill]
    );
    assert!(result.violations.iter().all(|v| v.auto_fixable));
    assert_eq!(result.violations[0].actual, "missing");
    assert_eq!(result.violations[3].actual, "black");

    assert_eq!(
        result.auto_fixed,
        r#"<svg viewBox="0 0 24 24" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" fill="none"><path d="M6 19h4V5H6v14zm8-14v14h4V5h-4z" fill="none"/></svg>"#
    );

    let changes: Vec<(&str, &str)> = result
        .changes
        .iter()
        .map(|c| (c.element.as_str(), c.attribute.as_str()))
        .collect();
    assert_eq!(
        changes,
        vec![
            ("svg", "stroke-width"),
            ("svg", "stroke-linecap"),
            ("svg", "stroke-linejoin"),
            ("path", "fill"),
            ("svg", "fill"),
        ]
    );
    assert_eq!(result.changes[3].before.as_deref(), Some("black"));
    assert_eq!(result.changes[4].before, None);
}

#[test]
fn compliant_icon_is_untouched() {
    let svg = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
  <circle cx="12" cy="12" r="10"/>
  <polyline points="12 6 12 12 16 14"/>
</svg>"#;

    let result = enforce(svg, &EnforcementRules::feather());
    assert!(result.passed);
    assert_eq!(result.score, 100);
    assert!(result.violations.is_empty());
    assert!(result.changes.is_empty());
    assert_eq!(result.auto_fixed, svg);
}

#[test]
fn fixes_reach_a_fixed_point() {
    let candidates = [
        PAUSE,
        "<svg><path d='M0 0h4'/></svg>",
        "<svg viewBox='0 0 48 48' style='stroke-width:3;stroke-linecap:butt'><g fill='red'><rect width='4' height='4' style='fill: blue'/></g></svg>",
        "<svg stroke-width=\"1\" stroke-linejoin='miter'><circle r='1' fill='#000'/><path d='M1 1'/></svg>",
        "<?xml version='1.0'?>\n<svg xmlns='http://www.w3.org/2000/svg'>\n  <line x2='4' stroke-linecap='square'/>\n</svg>\n",
    ];

    let rules = EnforcementRules::feather();
    for svg in &candidates {
        let first = enforce(svg, &rules);
        assert!(first.violations.iter().all(|v| v.auto_fixable), "{}", svg);

        let second = enforce(&first.auto_fixed, &rules);
        assert!(second.passed, "{} -> {}", svg, first.auto_fixed);
        assert_eq!(second.score, 100);
        assert_eq!(second.auto_fixed, first.auto_fixed);
    }
}

#[test]
fn style_declarations_are_replaced() {
    let svg = "<svg viewBox='0 0 24 24' style='stroke-width:3;stroke-linecap:butt;opacity:0.5'/>";
    let rules = EnforcementRules {
        stroke_width: Some(2.0),
        stroke_linecap: Some(StrokeCap::Round),
        ..EnforcementRules::default()
    };

    let result = enforce(svg, &rules);
    assert_eq!(result.violations[0].actual, "3");
    assert_eq!(result.violations[1].actual, "butt");
    assert_eq!(
        result.auto_fixed,
        "<svg viewBox='0 0 24 24' style='opacity:0.5' stroke-width=\"2\" stroke-linecap=\"round\"/>"
    );
}

#[test]
fn warnings_do_not_fail() {
    let d = "M0 0".to_string() + &"c1 1 2 2 3 3".repeat(90);
    let svg = format!("<svg fill='none'><path d='{}'/></svg>", d);
    let rules = EnforcementRules {
        require_fill_none: true,
        ..EnforcementRules::default()
    };

    let result = enforce(&svg, &rules);
    assert!(result.passed);
    assert_eq!(result.score, 90);
    assert!(result.violations.iter().all(|v| v.severity == Severity::Warning));
    assert_eq!(result.auto_fixed, svg);
}

#[test]
fn malformed_candidate() {
    let svg = "<svg><path d='M0 0'></svg>";
    let result = enforce(svg, &EnforcementRules::feather());
    assert!(!result.passed);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, Rule::Markup);
    assert_eq!(result.auto_fixed, svg);
}

#[test]
fn rules_from_analysis() {
    let icons = vec![
        Icon::new("<svg viewBox='0 0 32 32' fill='none' stroke='black' stroke-width='1.5' stroke-linecap='square' stroke-linejoin='miter'><path d='M0 0h4'/></svg>");
        3
    ];
    let summary = analyze(&icons, &AnalyzerOptions::default()).unwrap();
    let rules = EnforcementRules::from_summary(&summary);
    assert_eq!(rules.view_box.as_deref(), Some("0 0 32 32"));

    for icon in &icons {
        assert!(enforce(&icon.svg, &rules).passed);
    }

    let result = enforce(PAUSE, &rules);
    let failed: Vec<Rule> = result.violations.iter().map(|v| v.rule).collect();
    assert_eq!(
        failed,
        vec![
            Rule::StrokeWidth,
            Rule::StrokeLinecap,
            Rule::StrokeLinejoin,
            Rule::ViewBox,
            Rule::Fill
        ]
    );
    assert_eq!(result.score, 0);
    assert!(enforce(&result.auto_fixed, &rules).passed);
}

#[test]
fn rules_from_manifest() {
    let manifest = "\
# Lucide-like style
stroke-width = 2
stroke-linecap: round
stroke-linejoin: round
viewBox: 0 0 24 24
fill: none
max-commands: 5
";
    let rules = EnforcementRules::from_manifest(manifest);
    let result = enforce(PAUSE, &rules);
    assert_eq!(result.errors(), 4);
    assert_eq!(result.warnings(), 1);
    assert_eq!(result.score, 15);
}
