/*!
*pathdata* is a tokenizer and a precision reducer for the
[SVG path data](https://www.w3.org/TR/SVG2/paths.html#PathData) mini-language.

## Features

- Complete support of the path grammar, so data like `M10-20A5.5.3-4 010-.1` will be parsed correctly.
- Arc flags are parsed as single chars and stored as booleans, so they can never be
  damaged by numeric transformations.
- Lenient parsing for messy third-party data and strict parsing for validation.
- Compact writing that omits optional separators and repeated command letters.

## Example

```
use pathdata::{parse, round_path_data};

let commands = parse("M0 0 a22 22 0 012-3.9").unwrap();
assert_eq!(commands[1].arc_flags(), Some((false, true)));

assert_eq!(round_path_data("M 0.333 0 L 10.25 4", 1), "M0.3 0 10.3 4");
```

## Safety

- The library should not panic. Any panic considered as a critical bug.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

mod command;
mod error;
mod parser;
mod round;
mod stream;
mod writer;

use float_cmp::ApproxEqUlps;

pub use crate::command::{Argument, CommandKind, PathCommand, PathStats};
pub use crate::error::Error;
pub use crate::parser::{
    count_command_letters, parse, parse_with_mode, validate, ParsingMode, PathParser,
};
pub use crate::round::{
    round_number, round_path_data, round_path_data_with, round_precision, MAX_PRECISION,
};
pub use crate::stream::Stream;
pub use crate::writer::{write_commands, WriteOptions};

/// An approximate floating point equality comparison.
pub trait FuzzyEq<Rhs: ?Sized = Self> {
    /// Checks that values are approximately equal.
    fn fuzzy_eq(&self, other: &Rhs) -> bool;

    /// Checks that values are not approximately equal.
    #[inline]
    fn fuzzy_ne(&self, other: &Rhs) -> bool {
        !self.fuzzy_eq(other)
    }
}

/// An approximate zero comparison.
pub trait FuzzyZero: FuzzyEq {
    /// Checks that the value is approximately zero.
    fn is_fuzzy_zero(&self) -> bool;
}

impl FuzzyEq for f64 {
    #[inline]
    fn fuzzy_eq(&self, other: &f64) -> bool {
        self.approx_eq_ulps(other, 4)
    }
}

impl FuzzyZero for f64 {
    #[inline]
    fn is_fuzzy_zero(&self) -> bool {
        self.fuzzy_eq(&0.0)
    }
}
