// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Returns the keyword as written in SVG.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err("invalid"),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum!(
    /// An icon set rendering style.
    StrokeStyle {
        Outline => "outline",
        Filled => "filled",
        Mixed => "mixed",
    }
);

keyword_enum!(
    /// A `stroke-linecap` value.
    StrokeCap {
        Round => "round",
        Square => "square",
        Butt => "butt",
    }
);

keyword_enum!(
    /// A `stroke-linejoin` value.
    StrokeJoin {
        Round => "round",
        Miter => "miter",
        Bevel => "bevel",
    }
);

keyword_enum!(
    /// How an icon set uses fills.
    FillUsage {
        None => "none",
        Solid => "solid",
        Partial => "partial",
    }
);

keyword_enum!(
    /// An amount of details in an icon.
    DetailLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

keyword_enum!(
    /// A rendering style of a single icon.
    ///
    /// Usually comes from icon library metadata.
    RenderStyle {
        Stroke => "stroke",
        Fill => "fill",
        Mixed => "mixed",
    }
);

impl From<StrokeStyle> for FillUsage {
    fn from(style: StrokeStyle) -> Self {
        match style {
            StrokeStyle::Outline => FillUsage::None,
            StrokeStyle::Filled => FillUsage::Solid,
            StrokeStyle::Mixed => FillUsage::Partial,
        }
    }
}

/// A canonical style profile of an icon set.
///
/// Produced by [`analyze`](crate::analyze) and never modified afterwards.
#[derive(Clone, PartialEq, Debug)]
pub struct StyleSummary {
    /// A median stroke width, snapped to an allowed value when required.
    pub avg_stroke_width: f64,
    /// Whether icons are stroked, filled or both.
    pub stroke_style: StrokeStyle,
    /// The most common `stroke-linecap`.
    pub stroke_cap: StrokeCap,
    /// The most common `stroke-linejoin`.
    pub stroke_join: StrokeJoin,
    /// A median corner radius.
    pub avg_corner_radius: f64,
    /// Derived from `stroke_style`.
    pub fill_usage: FillUsage,
    /// The most common geometry label, like `circles and curves`.
    pub dominant_shapes: String,
    /// The most common detail level.
    pub detail_level: DetailLevel,
    /// How consistent the icon set is, in a 0..=1 range.
    ///
    /// Grows with the corpus size: starts at `0.5 + N / 20`
    /// and reaches 1.0 at 10 icons, so 5 uniform icons score 0.75.
    /// Then it's multiplied by:
    ///
    /// - 0.8 for less than 5 icons
    /// - 0.7 when less than half of the icons have a stroke width
    /// - the share of icons with the most common rendering style
    ///
    /// Advisory only. Not used during enforcement.
    pub confidence_score: f64,
    /// A canonical viewBox size, like 24.
    pub target_grid: Option<f64>,
}

impl fmt::Display for StyleSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "stroke-width: {}", self.avg_stroke_width)?;
        writeln!(f, "stroke-style: {}", self.stroke_style)?;
        writeln!(f, "stroke-linecap: {}", self.stroke_cap)?;
        writeln!(f, "stroke-linejoin: {}", self.stroke_join)?;
        writeln!(f, "corner-radius: {}", self.avg_corner_radius)?;
        writeln!(f, "fill-usage: {}", self.fill_usage)?;
        writeln!(f, "shapes: {}", self.dominant_shapes)?;
        writeln!(f, "detail: {}", self.detail_level)?;
        writeln!(f, "confidence: {:.2}", self.confidence_score)?;
        match self.target_grid {
            Some(grid) => write!(f, "grid: {}", grid),
            None => write!(f, "grid: unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!("round".parse::<StrokeCap>(), Ok(StrokeCap::Round));
        assert_eq!("miter".parse::<StrokeJoin>(), Ok(StrokeJoin::Miter));
        assert!("Round".parse::<StrokeCap>().is_err());
        assert_eq!(StrokeStyle::Outline.to_string(), "outline");
    }

    #[test]
    fn fill_usage_from_style() {
        assert_eq!(FillUsage::from(StrokeStyle::Outline), FillUsage::None);
        assert_eq!(FillUsage::from(StrokeStyle::Mixed), FillUsage::Partial);
    }
}
