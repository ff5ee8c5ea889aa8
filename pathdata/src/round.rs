use crate::writer::write_commands;
use crate::{parse, PathCommand, WriteOptions};

const POW_VEC: &[f64] = &[
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
    1_000_000_000.0,
    10_000_000_000.0,
    100_000_000_000.0,
    1_000_000_000_000.0,
];

/// The largest supported precision.
pub const MAX_PRECISION: u8 = 12;

/// Rounds a number to the selected amount of decimal places.
///
/// Halves are rounded away from zero.
/// Precision larger than [`MAX_PRECISION`] is clamped.
pub fn round_number(n: f64, decimals: u8) -> f64 {
    let pow = POW_VEC[decimals.min(MAX_PRECISION) as usize];
    let v = (n * pow).round() / pow;

    // Values that do not fit the precision are kept as is.
    if v.is_finite() {
        v
    } else {
        n
    }
}

/// Rounds all numeric arguments of the commands.
///
/// Arc flags are copied as is and never go through the rounding.
pub fn round_precision(commands: &[PathCommand], decimals: u8) -> Vec<PathCommand> {
    commands
        .iter()
        .map(|cmd| cmd.map_numbers(|n| round_number(n, decimals)))
        .collect()
}

/// Parses, rounds and writes path data back using the default [`WriteOptions`].
///
/// Malformed tokens are skipped, just like in [`parse`].
///
/// # Examples
///
/// ```
/// assert_eq!(
///     pathdata::round_path_data("M0.123 0 a22.46 22 0 012-3.94", 1),
///     "M0.1 0a22.5 22 0 012-3.9"
/// );
/// ```
pub fn round_path_data(text: &str, decimals: u8) -> String {
    round_path_data_with(text, decimals, &WriteOptions::default())
}

/// Parses, rounds and writes path data back.
pub fn round_path_data_with(text: &str, decimals: u8, opt: &WriteOptions) -> String {
    // The lenient parsing never fails.
    let commands = parse(text).unwrap_or_default();
    write_commands(&round_precision(&commands, decimals), opt)
}
