// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use pathdata::FuzzyEq;

use crate::markup::{self, is_element, Editor};
use crate::rules::EnforcementRules;

/// A violation severity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    /// Blocks acceptance. Usually can be fixed automatically.
    Error,
    /// Requires a human review.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A checked rule.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rule {
    StrokeWidth,
    StrokeLinecap,
    StrokeLinejoin,
    ViewBox,
    Fill,
    OpticalWeight,
    PathComplexity,
    /// The markup is not a well-formed XML.
    Markup,
}

impl Rule {
    /// Returns the rule name.
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::StrokeWidth => "stroke-width",
            Rule::StrokeLinecap => "stroke-linecap",
            Rule::StrokeLinejoin => "stroke-linejoin",
            Rule::ViewBox => "viewBox",
            Rule::Fill => "fill",
            Rule::OpticalWeight => "optical-weight",
            Rule::PathComplexity => "path-complexity",
            Rule::Markup => "markup",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected style mismatch.
#[derive(Clone, PartialEq, Debug)]
pub struct Violation {
    /// A violated rule.
    pub rule: Rule,
    /// A required value.
    pub expected: String,
    /// A found value or `missing`.
    pub actual: String,
    /// A violation severity.
    pub severity: Severity,
    /// Whether [`ComplianceResult::auto_fixed`] has this violation fixed.
    pub auto_fixable: bool,
    /// Elements the value was found on.
    pub location: Option<String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} expected '{}', found '{}'",
            self.severity, self.rule, self.expected, self.actual
        )?;

        if let Some(ref location) = self.location {
            write!(f, " in {}", location)?;
        }

        if self.auto_fixable {
            write!(f, " (fixed)")?;
        }

        Ok(())
    }
}

/// An attribute change made by an autofix.
#[derive(Clone, PartialEq, Debug)]
pub struct Change {
    /// A changed element name.
    pub element: String,
    /// A changed attribute name.
    pub attribute: String,
    /// A previous value. `None` when the attribute was inserted.
    pub before: Option<String>,
    /// A new value.
    pub after: String,
    /// Why the change was made.
    pub reason: String,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} '{}' -> '{}' ({})",
            self.element,
            self.attribute,
            self.before.as_deref().unwrap_or("missing"),
            self.after,
            self.reason
        )
    }
}

/// An enforcement result.
#[derive(Clone, PartialEq, Debug)]
pub struct ComplianceResult {
    /// Set when there are no error-severity violations.
    pub passed: bool,
    /// A compliance score in a 0..=100 range.
    pub score: u8,
    /// Violations in the rules order.
    pub violations: Vec<Violation>,
    /// The candidate markup with all autofixes applied.
    ///
    /// Identical to the input when nothing was fixed.
    pub auto_fixed: String,
    /// Changes in the order they were made.
    pub changes: Vec<Change>,
}

impl ComplianceResult {
    fn new(violations: Vec<Violation>, auto_fixed: String, changes: Vec<Change>) -> Self {
        let errors = count(&violations, Severity::Error);
        let warnings = count(&violations, Severity::Warning);
        let score = (100 - 20 * errors as i64 - 5 * warnings as i64).max(0) as u8;

        ComplianceResult {
            passed: errors == 0,
            score,
            violations,
            auto_fixed,
            changes,
        }
    }

    /// Returns the number of error-severity violations.
    pub fn errors(&self) -> usize {
        count(&self.violations, Severity::Error)
    }

    /// Returns the number of warnings.
    pub fn warnings(&self) -> usize {
        count(&self.violations, Severity::Warning)
    }
}

fn count(violations: &[Violation], severity: Severity) -> usize {
    violations.iter().filter(|v| v.severity == severity).count()
}

/// Checks an icon against the rules and fixes what can be fixed.
///
/// Never fails. Malformed markup is reported as a `markup` violation.
pub fn enforce(svg: &str, rules: &EnforcementRules) -> ComplianceResult {
    let doc = match markup::parse_document(svg) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Failed to parse a candidate icon cause {}.", e);
            let v = Violation {
                rule: Rule::Markup,
                expected: "well-formed SVG".to_string(),
                actual: e.to_string(),
                severity: Severity::Error,
                auto_fixable: false,
                location: None,
            };
            return ComplianceResult::new(vec![v], svg.to_string(), Vec::new());
        }
    };

    let mut ctx = Context {
        root: doc.root_element(),
        editor: Editor::new(svg),
        violations: Vec::new(),
        changes: Vec::new(),
    };

    if let Some(width) = rules.stroke_width {
        ctx.check_inherited(Rule::StrokeWidth, &width.to_string(), |v| {
            markup::parse_length(v).map_or(false, |n| n.fuzzy_eq(&width))
        });
    }

    if let Some(cap) = rules.stroke_linecap {
        ctx.check_inherited(Rule::StrokeLinecap, cap.as_str(), |v| v == cap.as_str());
    }

    if let Some(join) = rules.stroke_linejoin {
        ctx.check_inherited(Rule::StrokeLinejoin, join.as_str(), |v| v == join.as_str());
    }

    if let Some(ref view_box) = rules.view_box {
        ctx.check_view_box(view_box);
    }

    if rules.require_fill_none {
        ctx.check_fill_none();
    }

    ctx.check_paths(rules);

    let Context {
        editor,
        violations,
        changes,
        ..
    } = ctx;

    ComplianceResult::new(violations, editor.apply(), changes)
}

struct Context<'a, 'input> {
    root: roxmltree::Node<'a, 'input>,
    editor: Editor<'input>,
    violations: Vec<Violation>,
    changes: Vec<Change>,
}

impl<'a, 'input: 'a> Context<'a, 'input> {
    /// Checks a property that children inherit from the root.
    fn check_inherited<F>(&mut self, rule: Rule, expected: &str, matches: F)
    where
        F: Fn(&str) -> bool,
    {
        let name = rule.as_str();
        let found = find_inherited(self.root, name);
        if let Some((_, value)) = found {
            if matches(value) {
                return;
            }
        }

        self.violations.push(Violation {
            rule,
            expected: expected.to_string(),
            actual: found.map_or("missing", |(_, v)| v).to_string(),
            severity: Severity::Error,
            auto_fixable: true,
            location: found.map(|(node, _)| node.tag_name().name().to_string()),
        });

        self.set(self.root, name, expected, format!("icons must use {}={}", name, expected));
    }

    fn check_view_box(&mut self, expected: &str) {
        let found = self.root.attribute("viewBox");
        let found_box = found.and_then(markup::parse_view_box);
        let valid = match (found_box, markup::parse_view_box(expected)) {
            (Some(a), Some(b)) => a.iter().zip(b.iter()).all(|(a, b)| a.fuzzy_eq(b)),
            _ => found == Some(expected),
        };

        if valid {
            return;
        }

        self.violations.push(Violation {
            rule: Rule::ViewBox,
            expected: expected.to_string(),
            actual: found.unwrap_or("missing").to_string(),
            severity: Severity::Error,
            auto_fixable: true,
            location: Some(self.root.tag_name().name().to_string()),
        });

        self.set(self.root, "viewBox", expected, format!("icons must use the {} grid", expected));
    }

    fn check_fill_none(&mut self) {
        let root_is_none = markup::property(self.root, "fill") == Some("none");

        let mut offending = Vec::new();
        for node in markup::drawables(self.root) {
            match markup::property(node, "fill") {
                Some("none") => {}
                Some(value) => offending.push((node, Some(value))),
                None if !root_is_none => offending.push((node, None)),
                None => {}
            }
        }

        if offending.is_empty() {
            return;
        }

        let mut actual: Vec<&str> = Vec::new();
        let mut location: Vec<&str> = Vec::new();
        for (node, value) in &offending {
            let value = value.unwrap_or("missing");
            if !actual.contains(&value) {
                actual.push(value);
            }

            let name = node.tag_name().name();
            if !location.contains(&name) {
                location.push(name);
            }
        }

        self.violations.push(Violation {
            rule: Rule::Fill,
            expected: "none".to_string(),
            actual: actual.join(", "),
            severity: Severity::Error,
            auto_fixable: true,
            location: Some(location.join(", ")),
        });

        for (node, _) in offending {
            self.set(node, "fill", "none", "stroke-based icons must not be filled".to_string());
        }

        if !root_is_none {
            self.set(self.root, "fill", "none", "children inherit fill from the root".to_string());
        }
    }

    fn check_paths(&mut self, rules: &EnforcementRules) {
        let mut chars = 0;
        let mut commands = 0;
        for node in self.root.descendants().filter(|n| is_element(*n, "path")) {
            let d = node.attribute("d").unwrap_or("");
            chars += d.len();
            commands += pathdata::count_command_letters(d);
        }

        let weight = (chars as f64 / 1000.0).min(1.0);
        if weight > rules.max_optical_weight {
            self.violations.push(Violation {
                rule: Rule::OpticalWeight,
                expected: format!("<= {}", rules.max_optical_weight),
                actual: format!("{:.2}", weight),
                severity: Severity::Warning,
                auto_fixable: false,
                location: None,
            });
        }

        if commands > rules.max_path_commands {
            self.violations.push(Violation {
                rule: Rule::PathComplexity,
                expected: format!("<= {}", rules.max_path_commands),
                actual: commands.to_string(),
                severity: Severity::Warning,
                auto_fixable: false,
                location: None,
            });
        }
    }

    fn set(&mut self, node: roxmltree::Node, name: &str, value: &str, reason: String) {
        self.editor.set_attribute(node, name, value);
        self.changes.push(Change {
            element: node.tag_name().name().to_string(),
            attribute: name.to_string(),
            before: markup::property(node, name).map(str::to_string),
            after: value.to_string(),
            reason,
        });
    }
}

/// Looks for a property on the root, then on groups, then on the first drawable element.
fn find_inherited<'a, 'input: 'a>(
    root: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<(roxmltree::Node<'a, 'input>, &'a str)> {
    if let Some(value) = markup::property(root, name) {
        return Some((root, value));
    }

    let group = root
        .descendants()
        .filter(|n| is_element(*n, "g"))
        .find_map(|n| markup::property(n, name).map(|v| (n, v)));
    if group.is_some() {
        return group;
    }

    let first = markup::drawables(root).next()?;
    markup::property(first, name).map(|v| (first, v))
}
