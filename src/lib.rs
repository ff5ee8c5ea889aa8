// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`styledna` infers a canonical style profile from an icon set and enforces it on new icons.

The pipeline has two halves:

- [`analyze`] scans a corpus of SVG icons and produces a [`StyleSummary`]:
  median stroke width and corner radius, the most common caps, joins, geometry
  and detail level, a grid size and a confidence score.
- [`enforce`] checks a candidate icon against [`EnforcementRules`],
  mechanically fixes what can be fixed and scores the rest.

Path data is handled by the [`pathdata`] crate, which never damages arc flags
while reducing coordinates precision.

## Example

```
use styledna::{enforce, EnforcementRules};

let svg = "<svg viewBox='0 0 24 24'><path d='M6 19h4V5H6z' fill='black'/></svg>";
let result = enforce(svg, &EnforcementRules::feather());
assert!(!result.passed);
assert!(enforce(&result.auto_fixed, &EnforcementRules::feather()).passed);
```

## Limitations

- Only unitless and `px` lengths are recognized.
- CSS is read only from `style` attributes. `<style>` elements are ignored.
- Nothing is rendered. All checks work on attributes and path data.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod analyzer;
mod cache;
mod enforcer;
mod markup;
mod rules;
mod style;

pub use pathdata;

pub use crate::analyzer::{analyze, scan_icon, summarize, AnalyzerOptions, Icon, IconScan};
pub use crate::cache::StyleCache;
pub use crate::enforcer::{enforce, Change, ComplianceResult, Rule, Severity, Violation};
pub use crate::markup::DRAWABLE_ELEMENTS;
pub use crate::rules::EnforcementRules;
pub use crate::style::{
    DetailLevel, FillUsage, RenderStyle, StrokeCap, StrokeJoin, StrokeStyle, StyleSummary,
};

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// An icon corpus has no usable icons.
    EmptyCorpus,

    /// Failed to parse an SVG data.
    ParsingFailed(roxmltree::Error),

    /// Failed to parse a path data in strict mode.
    InvalidPathData(pathdata::Error),
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl From<pathdata::Error> for Error {
    fn from(e: pathdata::Error) -> Self {
        Error::InvalidPathData(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::EmptyCorpus => {
                write!(f, "an icon corpus cannot be empty")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::InvalidPathData(ref e) => {
                write!(f, "path data parsing failed cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {}

trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}
