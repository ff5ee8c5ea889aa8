// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pathdata::{ParsingMode, PathStats};

use crate::markup::{self, is_element};
use crate::style::*;
use crate::{Error, OptionLog};

/// Icon set analysis options.
#[derive(Clone, Debug)]
pub struct AnalyzerOptions {
    /// Stroke widths the icon set is allowed to use.
    ///
    /// The median stroke width will be snapped to the nearest one.
    /// No snapping when empty.
    ///
    /// Default: empty
    pub allowed_stroke_widths: Vec<f64>,

    /// Canonical grid sizes.
    ///
    /// The most common viewBox size will be snapped to the nearest one.
    ///
    /// Default: `[16, 20, 24, 32, 48]`
    pub canonical_grids: Vec<f64>,

    /// A stroke width to use when none of the icons has one.
    ///
    /// Default: 2
    pub default_stroke_width: f64,

    /// A corner radius to use when none of the icons has rounded corners.
    ///
    /// Default: 3
    pub default_corner_radius: f64,

    /// Rejects icons with malformed path data instead of skipping
    /// the malformed parts.
    ///
    /// Default: false
    pub strict_path_data: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> AnalyzerOptions {
        AnalyzerOptions {
            allowed_stroke_widths: Vec::new(),
            canonical_grids: vec![16.0, 20.0, 24.0, 32.0, 48.0],
            default_stroke_width: 2.0,
            default_corner_radius: 3.0,
            strict_path_data: false,
        }
    }
}

impl AnalyzerOptions {
    /// Options for icon sets that use only 2, 3 and 4 stroke widths.
    pub fn discrete() -> Self {
        AnalyzerOptions {
            allowed_stroke_widths: vec![2.0, 3.0, 4.0],
            ..AnalyzerOptions::default()
        }
    }
}

/// A single icon of a corpus.
#[derive(Clone, PartialEq, Debug)]
pub struct Icon {
    /// An SVG markup.
    pub svg: String,

    /// A rendering style from the icon library metadata.
    ///
    /// Takes precedence over the markup.
    pub render_style: Option<RenderStyle>,
}

impl Icon {
    /// Creates an icon without metadata.
    pub fn new<S: Into<String>>(svg: S) -> Self {
        Icon {
            svg: svg.into(),
            render_style: None,
        }
    }

    /// Sets the rendering style from metadata.
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = Some(style);
        self
    }
}

/// Style properties found in a single icon.
///
/// Scans are independent from each other and can be collected in parallel.
/// Use [`summarize`] to join them.
#[derive(Clone, PartialEq, Debug)]
pub struct IconScan {
    /// All stroke widths in the document order.
    pub stroke_widths: Vec<f64>,
    /// All valid `stroke-linecap` values.
    pub stroke_caps: Vec<StrokeCap>,
    /// All valid `stroke-linejoin` values.
    pub stroke_joins: Vec<StrokeJoin>,
    /// Rect `rx`/`ry` and `border-radius` values.
    pub corner_radii: Vec<f64>,
    /// From metadata or guessed from `fill` and `stroke`.
    pub render_style: RenderStyle,
    /// A geometry label, like `circles and curves`.
    pub shapes: String,
    /// An amount of details.
    pub detail_level: DetailLevel,
    /// The largest viewBox side.
    pub grid: Option<f64>,
}

/// Scans a single icon.
pub fn scan_icon(icon: &Icon, opt: &AnalyzerOptions) -> Result<IconScan, Error> {
    let doc = markup::parse_document(&icon.svg)?;
    let root = doc.root_element();

    let mut scan = IconScan {
        stroke_widths: Vec::new(),
        stroke_caps: Vec::new(),
        stroke_joins: Vec::new(),
        corner_radii: Vec::new(),
        render_style: RenderStyle::Fill,
        shapes: String::new(),
        detail_level: DetailLevel::Low,
        grid: None,
    };

    let mut has_fill = false;
    let mut has_stroke = false;
    let mut shapes = Shapes::default();
    let mut elements = 0;
    let mut paths = 0;
    let mut commands = 0;

    for node in root.descendants().filter(|n| n.is_element()) {
        let drawable = markup::is_drawable(node);
        if !drawable && !is_element(node, "svg") && !is_element(node, "g") {
            continue;
        }

        if let Some(v) = markup::property(node, "stroke-width") {
            match markup::parse_length(v) {
                Some(n) => scan.stroke_widths.push(n),
                None => log::warn!("Invalid stroke-width '{}'. Skipped.", v),
            }
        }

        if let Some(v) = markup::property(node, "stroke-linecap") {
            if let Ok(cap) = v.parse() {
                scan.stroke_caps.push(cap);
            }
        }

        if let Some(v) = markup::property(node, "stroke-linejoin") {
            if let Ok(join) = v.parse() {
                scan.stroke_joins.push(join);
            }
        }

        if let Some(v) = markup::style_declaration(node, "border-radius") {
            scan.corner_radii.extend(markup::parse_length(v));
        }

        has_fill |= markup::property(node, "fill").map_or(false, |v| v != "none");
        has_stroke |= markup::property(node, "stroke").map_or(false, |v| v != "none");

        if !drawable {
            continue;
        }

        elements += 1;
        match node.tag_name().name() {
            "circle" | "ellipse" => shapes.circles = true,
            "rect" => {
                let mut rounded = false;
                for name in ["rx", "ry"] {
                    if let Some(r) = markup::property(node, name).and_then(markup::parse_length) {
                        scan.corner_radii.push(r);
                        rounded |= r > 0.0;
                    }
                }

                if rounded {
                    shapes.rounded_rects = true;
                } else {
                    shapes.rects = true;
                }
            }
            "line" | "polyline" | "polygon" => shapes.lines = true,
            "path" => {
                paths += 1;
                let d = node.attribute("d").unwrap_or("");
                let stats = path_stats(d, opt)?;
                commands += stats.commands;
                shapes.curves |= stats.has_curves();
                shapes.lines |= stats.has_lines();
            }
            _ => {}
        }
    }

    scan.render_style = match icon.render_style {
        Some(style) => style,
        None => match (has_fill, has_stroke) {
            (true, true) => RenderStyle::Mixed,
            (false, true) => RenderStyle::Stroke,
            // The default fill is black.
            _ => RenderStyle::Fill,
        },
    };

    scan.shapes = shapes.label();

    let avg_commands = if paths > 0 {
        commands as f64 / paths as f64
    } else {
        0.0
    };
    scan.detail_level = detail_level(elements, avg_commands);

    scan.grid = root.attribute("viewBox").and_then(|v| {
        markup::parse_view_box(v)
            .log_none(|| log::warn!("Invalid viewBox '{}'. Skipped.", v))
            .map(|vb| vb[2].max(vb[3]))
    });

    log::debug!(
        "Icon: {} elements, {:.1} commands per path, {} style, '{}'.",
        elements,
        avg_commands,
        scan.render_style,
        scan.shapes
    );

    Ok(scan)
}

fn path_stats(d: &str, opt: &AnalyzerOptions) -> Result<PathStats, Error> {
    let mode = if opt.strict_path_data {
        ParsingMode::Strict
    } else {
        ParsingMode::Lenient
    };

    let commands = pathdata::parse_with_mode(d, mode)?;
    let stats = PathStats::from_commands(&commands);
    log::debug!(
        "Path: {} commands in {} subpaths, {} arcs.",
        stats.commands,
        stats.subpaths,
        stats.arcs
    );
    Ok(stats)
}

#[derive(Clone, Copy, Default, Debug)]
struct Shapes {
    circles: bool,
    rounded_rects: bool,
    rects: bool,
    curves: bool,
    lines: bool,
}

impl Shapes {
    fn label(&self) -> String {
        let families = [
            (self.circles, "circles"),
            (self.rounded_rects, "rounded rectangles"),
            (self.rects, "rectangles"),
            (self.curves, "curves"),
            (self.lines, "straight lines"),
        ];

        let names: Vec<&str> = families
            .iter()
            .filter(|(present, _)| *present)
            .map(|(_, name)| *name)
            .take(2)
            .collect();

        if names.is_empty() {
            "simple shapes".to_string()
        } else {
            names.join(" and ")
        }
    }
}

fn detail_level(elements: usize, avg_commands: f64) -> DetailLevel {
    if elements <= 2 && avg_commands <= 10.0 {
        DetailLevel::Low
    } else if elements <= 5 && avg_commands <= 20.0 {
        DetailLevel::Medium
    } else {
        DetailLevel::High
    }
}

/// Joins icon scans into a style summary.
///
/// Returns [`Error::EmptyCorpus`] when `scans` is empty.
pub fn summarize(scans: &[IconScan], opt: &AnalyzerOptions) -> Result<StyleSummary, Error> {
    if scans.is_empty() {
        return Err(Error::EmptyCorpus);
    }

    let widths: Vec<f64> = scans
        .iter()
        .flat_map(|s| s.stroke_widths.iter().copied())
        .collect();
    let mut avg_stroke_width = median(widths).unwrap_or(opt.default_stroke_width);
    if let Some(n) = snap(avg_stroke_width, &opt.allowed_stroke_widths) {
        avg_stroke_width = n;
    }

    let stroke_cap = mode(scans.iter().flat_map(|s| s.stroke_caps.iter().copied()))
        .unwrap_or(StrokeCap::Round);
    let stroke_join = mode(scans.iter().flat_map(|s| s.stroke_joins.iter().copied()))
        .unwrap_or(StrokeJoin::Round);

    let radii: Vec<f64> = scans
        .iter()
        .flat_map(|s| s.corner_radii.iter().copied())
        .collect();
    let avg_corner_radius = median(radii).unwrap_or(opt.default_corner_radius);

    let stroke_style = stroke_style(scans);

    let dominant_shapes = mode(scans.iter().map(|s| s.shapes.as_str()))
        .unwrap_or("simple shapes")
        .to_string();
    let detail_level = mode(scans.iter().map(|s| s.detail_level)).unwrap_or(DetailLevel::Low);

    let target_grid = mode(scans.iter().filter_map(|s| s.grid))
        .map(|grid| snap(grid, &opt.canonical_grids).unwrap_or(grid));

    Ok(StyleSummary {
        avg_stroke_width,
        stroke_style,
        stroke_cap,
        stroke_join,
        avg_corner_radius,
        fill_usage: FillUsage::from(stroke_style),
        dominant_shapes,
        detail_level,
        confidence_score: confidence(scans),
        target_grid,
    })
}

/// Analyzes an icon set.
///
/// Icons that cannot be parsed are skipped with a warning.
/// Returns [`Error::EmptyCorpus`] when there are no icons left.
pub fn analyze(icons: &[Icon], opt: &AnalyzerOptions) -> Result<StyleSummary, Error> {
    if icons.is_empty() {
        return Err(Error::EmptyCorpus);
    }

    let mut scans = Vec::with_capacity(icons.len());
    for (idx, icon) in icons.iter().enumerate() {
        match scan_icon(icon, opt) {
            Ok(scan) => scans.push(scan),
            Err(e) => log::warn!("Failed to analyze icon #{} cause {}. Skipped.", idx, e),
        }
    }

    summarize(&scans, opt)
}

fn stroke_style(scans: &[IconScan]) -> StrokeStyle {
    let stroked = scans
        .iter()
        .filter(|s| s.render_style != RenderStyle::Fill)
        .count();
    let filled = scans
        .iter()
        .filter(|s| s.render_style != RenderStyle::Stroke)
        .count();

    if filled == 0 {
        StrokeStyle::Outline
    } else if stroked == 0 {
        StrokeStyle::Filled
    } else {
        StrokeStyle::Mixed
    }
}

fn confidence(scans: &[IconScan]) -> f64 {
    let count = scans.len();
    if count == 0 {
        return 0.0;
    }

    // Grows with the corpus size up to 10 icons.
    let mut score = (0.5 + count as f64 / 20.0).min(1.0);

    if count < 5 {
        score *= 0.8;
    }

    let with_widths = scans
        .iter()
        .filter(|s| !s.stroke_widths.is_empty())
        .count();
    if with_widths * 2 < count {
        score *= 0.7;
    }

    // A share of icons with the most common rendering style.
    let styles = scans.iter().map(|s| s.render_style);
    if let Some(common) = mode(styles.clone()) {
        let same = styles.filter(|s| *s == common).count();
        score *= same as f64 / count as f64;
    }

    score.max(0.0).min(1.0)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Returns the most frequent item. Ties are resolved in favor of the first seen.
fn mode<T, I>(items: I) -> Option<T>
where
    T: PartialEq + Copy,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(v, _)| *v == item) {
            Some(entry) => entry.1 += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (item, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((item, count));
        }
    }

    best.map(|(item, _)| item)
}

fn snap(n: f64, allowed: &[f64]) -> Option<f64> {
    allowed
        .iter()
        .copied()
        .min_by(|a, b| (a - n).abs().total_cmp(&(b - n).abs()))
}
