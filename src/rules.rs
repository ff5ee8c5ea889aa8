// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::style::{StrokeCap, StrokeJoin, StrokeStyle, StyleSummary};
use crate::OptionLog;

/// A target style to enforce.
///
/// `None` values are not checked.
#[derive(Clone, PartialEq, Debug)]
pub struct EnforcementRules {
    /// A required `stroke-width`.
    pub stroke_width: Option<f64>,

    /// A required `stroke-linecap`.
    pub stroke_linecap: Option<StrokeCap>,

    /// A required `stroke-linejoin`.
    pub stroke_linejoin: Option<StrokeJoin>,

    /// A required `viewBox`, like `0 0 24 24`.
    pub view_box: Option<String>,

    /// Requires `fill="none"` on every drawable element.
    pub require_fill_none: bool,

    /// A maximum optical weight in a 0..=1 range.
    ///
    /// Exceeding it produces a warning only.
    ///
    /// Default: 0.8
    pub max_optical_weight: f64,

    /// A maximum number of path commands.
    ///
    /// Exceeding it produces a warning only.
    ///
    /// Default: 50
    pub max_path_commands: usize,
}

impl Default for EnforcementRules {
    fn default() -> Self {
        EnforcementRules {
            stroke_width: None,
            stroke_linecap: None,
            stroke_linejoin: None,
            view_box: None,
            require_fill_none: false,
            max_optical_weight: 0.8,
            max_path_commands: 50,
        }
    }
}

impl EnforcementRules {
    /// Rules of the Feather icon set.
    ///
    /// 2px round strokes, no fills and a 24x24 grid.
    pub fn feather() -> Self {
        EnforcementRules {
            stroke_width: Some(2.0),
            stroke_linecap: Some(StrokeCap::Round),
            stroke_linejoin: Some(StrokeJoin::Round),
            view_box: Some("0 0 24 24".to_string()),
            require_fill_none: true,
            ..EnforcementRules::default()
        }
    }

    /// Derives rules from an icon set style.
    ///
    /// Stroke properties are not enforced on filled icon sets.
    pub fn from_summary(summary: &StyleSummary) -> Self {
        let stroked = summary.stroke_style != StrokeStyle::Filled;
        EnforcementRules {
            stroke_width: Some(summary.avg_stroke_width).filter(|_| stroked),
            stroke_linecap: Some(summary.stroke_cap).filter(|_| stroked),
            stroke_linejoin: Some(summary.stroke_join).filter(|_| stroked),
            view_box: summary.target_grid.map(|g| format!("0 0 {} {}", g, g)),
            require_fill_none: summary.stroke_style == StrokeStyle::Outline,
            ..EnforcementRules::default()
        }
    }

    /// Parses rules from a free-text manifest.
    ///
    /// Each line is a `key: value` or a `key = value` pair.
    /// `#` starts a comment. Unknown keys and invalid values are skipped with a warning.
    ///
    /// ```text
    /// # Feather
    /// stroke-width: 2
    /// stroke-linecap: round
    /// viewBox = 0 0 24 24
    /// fill: none
    /// ```
    pub fn from_manifest(text: &str) -> Self {
        let mut rules = EnforcementRules::default();
        for (idx, line) in text.lines().enumerate() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (key, value) = match line.find(|c| c == ':' || c == '=') {
                Some(pos) => (line[..pos].trim(), line[pos + 1..].trim()),
                None => {
                    log::warn!("Invalid manifest line {}: '{}'. Skipped.", idx + 1, line);
                    continue;
                }
            };

            let warn = || log::warn!("Invalid '{}' value: '{}'. Skipped.", key, value);
            match key {
                "stroke-width" => {
                    if let Some(n) = crate::markup::parse_length(value).log_none(warn) {
                        rules.stroke_width = Some(n);
                    }
                }
                "stroke-linecap" => {
                    if let Some(cap) = value.parse().ok().log_none(warn) {
                        rules.stroke_linecap = Some(cap);
                    }
                }
                "stroke-linejoin" => {
                    if let Some(join) = value.parse().ok().log_none(warn) {
                        rules.stroke_linejoin = Some(join);
                    }
                }
                "viewBox" => {
                    if crate::markup::parse_view_box(value).log_none(warn).is_some() {
                        rules.view_box = Some(value.to_string());
                    }
                }
                "fill" => rules.require_fill_none = value == "none",
                "max-weight" => {
                    let n = value.parse::<f64>().ok().filter(|n| n.is_finite());
                    if let Some(n) = n.log_none(warn) {
                        rules.max_optical_weight = n;
                    }
                }
                "max-commands" => {
                    if let Some(n) = value.parse().ok().log_none(warn) {
                        rules.max_path_commands = n;
                    }
                }
                _ => log::warn!("Unknown manifest key '{}'. Skipped.", key),
            }
        }

        rules
    }
}
