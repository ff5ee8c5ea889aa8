use std::fmt::Write;

use crate::command::{CommandKind, PathCommand};
use crate::{Argument, FuzzyZero};

/// Path data writing options.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WriteOptions {
    /// Omit optional separators and repeated command letters.
    ///
    /// # Examples
    ///
    /// Before:
    ///
    /// ```text
    /// M10 -20 L30 40 L50 60 A22 22 0 0 1 2 -3.9
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// M10-20 30 40 50 60A22 22 0 012-3.9
    /// ```
    ///
    /// Default: enabled
    pub compact: bool,

    /// Write `.5` instead of `0.5`.
    ///
    /// Default: disabled
    pub remove_leading_zero: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            compact: true,
            remove_leading_zero: false,
        }
    }
}

/// Writes commands back to path data.
pub fn write_commands(commands: &[PathCommand], opt: &WriteOptions) -> String {
    let mut buf = String::new();
    let mut prev: Option<&PathCommand> = None;
    // The last written token, used to decide if a separator can be omitted.
    let mut last = Token::None;

    for cmd in commands {
        let write_letter = !opt.compact || !can_omit_letter(prev, cmd);
        if write_letter {
            if !opt.compact && !buf.is_empty() {
                buf.push(' ');
            }

            buf.push(cmd.letter());
            last = Token::Letter;
        }

        for (idx, arg) in cmd.args().iter().enumerate() {
            match *arg {
                Argument::Number(n) => {
                    let mut num = String::new();
                    write_num(n, &mut num, opt.remove_leading_zero);

                    if needs_separator(last, &num, opt.compact) {
                        buf.push(' ');
                    }

                    buf.push_str(&num);
                    last = Token::Number {
                        has_dot: num.contains('.'),
                    };
                }
                Argument::Flag(flag) => {
                    // Flags are always a single char. The first flag still needs
                    // a separator, otherwise `0 1` after a rotation would glue
                    // into the rotation number.
                    let first_flag = cmd.kind().is_flag_slot(idx) && !matches!(last, Token::Flag);
                    let skip_separator = opt.compact && !first_flag;
                    if !matches!(last, Token::Letter | Token::None) && !skip_separator {
                        buf.push(' ');
                    }

                    buf.push(if flag { '1' } else { '0' });
                    last = Token::Flag;
                }
            }
        }

        prev = Some(cmd);
    }

    buf
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Token {
    None,
    Letter,
    Number { has_dot: bool },
    Flag,
}

fn can_omit_letter(prev: Option<&PathCommand>, cmd: &PathCommand) -> bool {
    let prev = match prev {
        Some(v) => v,
        None => return false,
    };

    if prev.is_relative() != cmd.is_relative() {
        return false;
    }

    match (prev.kind(), cmd.kind()) {
        (_, CommandKind::ClosePath) | (_, CommandKind::MoveTo) => false,
        // An implicit LineTo.
        (CommandKind::MoveTo, CommandKind::LineTo) => true,
        (a, b) => a == b,
    }
}

fn needs_separator(last: Token, num: &str, compact: bool) -> bool {
    match last {
        Token::None | Token::Letter => false,
        // A flag is a single char, anything can follow it.
        Token::Flag => !compact,
        Token::Number { has_dot } => {
            if !compact {
                return true;
            }

            if num.starts_with('-') {
                return false;
            }

            // `1.5 .3` -> `1.5.3`
            !(has_dot && num.starts_with('.'))
        }
    }
}

/// Writes a number using the shortest representation.
///
/// Integers are written without a fractional part.
pub(crate) fn write_num(num: f64, buf: &mut String, remove_leading_zero: bool) {
    // Avoid `-0`.
    let num = if num.is_fuzzy_zero() { 0.0 } else { num };

    // If number is an integer, it's faster to write it as i64.
    if num.fract().is_fuzzy_zero() && num.abs() < i64::MAX as f64 {
        // `write!` to a `String` cannot fail.
        let _ = write!(buf, "{}", num.round() as i64);
        return;
    }

    let start = buf.len();
    let _ = write!(buf, "{}", num);

    if remove_leading_zero {
        let s = &buf[start..];
        if s.starts_with("0.") {
            buf.remove(start);
        } else if s.starts_with("-0.") {
            buf.remove(start + 1);
        }
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    macro_rules! test {
        ($name:ident, $text:expr, $compact:expr, $result:expr) => (
            #[test]
            fn $name() {
                let commands = parse($text).unwrap();
                let opt = WriteOptions { compact: $compact, ..WriteOptions::default() };
                assert_eq!(write_commands(&commands, &opt), $result);
            }
        )
    }

    test!(verbose_1, "M 10 20 L 30 40 Z", false, "M10 20 L30 40 Z");
    test!(verbose_2, "M10-20 30 40", false, "M10 -20 L30 40");
    test!(verbose_arc, "M0 0 a22 22 0 012-3.9", false, "M0 0 a22 22 0 0 1 2 -3.9");

    test!(compact_1, "M 10 -20 L 30 40 L 50 60", true, "M10-20 30 40 50 60");
    test!(compact_arc, "M0 0 a22 22 0 0 1 2 -3.9", true, "M0 0a22 22 0 012-3.9");
    test!(compact_arc_repeated, "M0 0 A1 1 0 1 0 2 2 A3 3 0 0 1 4 4", true,
        "M0 0A1 1 0 102 2 3 3 0 014 4");
    test!(compact_dots, "M 1.5 0.3", true, "M1.5 0.3");
    test!(compact_close, "M0 0 h4 v4 h-4 z m 1 1 z", true, "M0 0h4v4h-4zm1 1z");
    test!(compact_mixed_relativity, "M 1 1 l 2 2 L 3 3", true, "M1 1l2 2L3 3");

    #[test]
    fn leading_zero() {
        let commands = parse("M 1.5 0.3 L -0.25 0.5").unwrap();
        let opt = WriteOptions { compact: true, remove_leading_zero: true };
        assert_eq!(write_commands(&commands, &opt), "M1.5.3-.25.5");
    }

    #[test]
    fn num_format() {
        let mut s = String::new();
        write_num(-0.0, &mut s, false);
        s.push(' ');
        write_num(12.0, &mut s, false);
        s.push(' ');
        write_num(0.1, &mut s, false);
        assert_eq!(s, "0 12 0.1");
    }
}
