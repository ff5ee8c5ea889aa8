use crate::command::{CommandKind, PathCommand};
use crate::stream::ByteExt;
use crate::{Argument, Error, Stream};

/// A path data parsing mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParsingMode {
    /// Malformed tokens are skipped with a warning and parsing continues.
    ///
    /// Never produces an error.
    Lenient,
    /// Parsing stops at the first malformed token.
    Strict,
}

impl Default for ParsingMode {
    fn default() -> Self {
        ParsingMode::Lenient
    }
}

/// A pull-based [path data] parser.
///
/// Each command letter is followed by one or more argument groups.
/// Every group is returned as a separate [`PathCommand`], so `L 10 20 30 40`
/// produces two LineTo commands. Extra coordinate pairs after a MoveTo
/// are implicit LineTo commands, according to the SVG rules.
///
/// Arc flags are parsed as single `0`/`1` chars, so `a22 22 0 012-3.9`
/// is a valid arc with `large-arc=0`, `sweep=1`, `x=2` and `y=-3.9`.
///
/// # Errors
///
/// In [`ParsingMode::Strict`] the first malformed token produces an error
/// and stops the iteration. In [`ParsingMode::Lenient`] no errors are produced.
///
/// # Examples
///
/// ```
/// use pathdata::{CommandKind, PathParser};
///
/// let kinds: Vec<_> = PathParser::from("M10-20l30.1.5.1-20z")
///     .map(|cmd| cmd.unwrap().kind())
///     .collect();
///
/// assert_eq!(kinds, &[
///     CommandKind::MoveTo,
///     CommandKind::LineTo,
///     CommandKind::LineTo,
///     CommandKind::ClosePath,
/// ]);
/// ```
///
/// [path data]: https://www.w3.org/TR/SVG2/paths.html#PathData
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PathParser<'a> {
    stream: Stream<'a>,
    prev_cmd: Option<(CommandKind, bool)>,
    mode: ParsingMode,
}

impl<'a> From<&'a str> for PathParser<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        PathParser::with_mode(v, ParsingMode::default())
    }
}

impl<'a> PathParser<'a> {
    /// Creates a new parser with the selected mode.
    pub fn with_mode(text: &'a str, mode: ParsingMode) -> Self {
        PathParser {
            stream: Stream::from(text),
            prev_cmd: None,
            mode,
        }
    }
}

impl<'a> Iterator for PathParser<'a> {
    type Item = Result<PathCommand, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let s = &mut self.stream;

            s.skip_separators();

            if s.at_end() {
                return None;
            }

            match next_impl(s, &mut self.prev_cmd, self.mode) {
                Ok(Some(cmd)) => return Some(Ok(cmd)),
                // Something was skipped. Try again.
                Ok(None) => continue,
                Err(e) => {
                    s.jump_to_end();
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Parses path data in the lenient mode.
///
/// Malformed tokens are skipped, so this function never fails.
/// The `Result` is kept to match [`parse_with_mode`].
pub fn parse(text: &str) -> Result<Vec<PathCommand>, Error> {
    parse_with_mode(text, ParsingMode::Lenient)
}

/// Parses path data using the selected mode.
pub fn parse_with_mode(text: &str, mode: ParsingMode) -> Result<Vec<PathCommand>, Error> {
    PathParser::with_mode(text, mode).collect()
}

/// Validates path data using the strict mode.
///
/// Returns the number of commands.
pub fn validate(text: &str) -> Result<usize, Error> {
    let mut count = 0;
    for cmd in PathParser::with_mode(text, ParsingMode::Strict) {
        cmd?;
        count += 1;
    }

    Ok(count)
}

/// Counts command letters in path data without parsing it.
pub fn count_command_letters(text: &str) -> usize {
    text.bytes()
        .filter(|c| CommandKind::from_letter(*c).is_some())
        .count()
}

// Returns `Ok(None)` when a malformed token was skipped in the lenient mode.
fn next_impl(
    s: &mut Stream,
    prev_cmd: &mut Option<(CommandKind, bool)>,
    mode: ParsingMode,
) -> Result<Option<PathCommand>, Error> {
    let start = s.pos();
    let first_char = s.curr_byte_unchecked();

    let (kind, relative) = if let Some((kind, relative)) = CommandKind::from_letter(first_char) {
        if prev_cmd.is_none() && kind != CommandKind::MoveTo && mode == ParsingMode::Strict {
            // The first command must be a MoveTo.
            return Err(Error::UnexpectedData(s.calc_char_pos_at(start)));
        }

        s.advance(1);

        if kind == CommandKind::ClosePath {
            *prev_cmd = Some((kind, relative));
            return Ok(Some(PathCommand::close_path(relative)));
        }

        (kind, relative)
    } else if first_char.is_number_start() {
        match *prev_cmd {
            None | Some((CommandKind::ClosePath, _)) => {
                // A number without a command or after a ClosePath.
                let e = Error::UnexpectedData(s.calc_char_pos_at(start));
                skip(mode, e)?;
                if s.parse_number().is_err() {
                    s.skip_char();
                }

                return Ok(None);
            }
            // 'If a moveto is followed by multiple pairs of coordinates,
            // the subsequent pairs are treated as implicit lineto commands.'
            Some((CommandKind::MoveTo, relative)) => (CommandKind::LineTo, relative),
            Some(prev) => prev,
        }
    } else {
        skip(mode, Error::UnexpectedData(s.calc_char_pos_at(start)))?;
        s.skip_char();
        return Ok(None);
    };

    let arity = kind.arity();
    let mut args = Vec::with_capacity(arity);
    while args.len() < arity {
        s.skip_separators();

        let is_cmd_or_end = match s.curr_byte() {
            Ok(c) => CommandKind::from_letter(c).is_some(),
            Err(_) => true,
        };

        if is_cmd_or_end {
            // An incomplete group is dropped.
            *prev_cmd = Some((kind, relative));
            skip(
                mode,
                Error::MissingArguments {
                    cmd: kind.letter(relative),
                    pos: s.calc_char_pos(),
                },
            )?;
            return Ok(None);
        }

        if kind.is_flag_slot(args.len()) {
            match s.parse_flag() {
                Ok(flag) => args.push(Argument::Flag(flag)),
                Err(e) => {
                    skip(mode, e)?;
                    // Flags cannot be resynchronized,
                    // so the rest of the arguments is dropped.
                    s.skip_bytes(|_, c| CommandKind::from_letter(c).is_none());
                    *prev_cmd = Some((kind, relative));
                    return Ok(None);
                }
            }
        } else {
            match s.parse_number() {
                Ok(n) => args.push(Argument::Number(n)),
                Err(e) => {
                    skip(mode, e)?;
                    // Retry the same slot after the malformed char.
                    s.skip_char();
                }
            }
        }
    }

    *prev_cmd = Some((kind, relative));
    Ok(Some(PathCommand::new_unchecked(kind, relative, args)))
}

fn skip(mode: ParsingMode, e: Error) -> Result<(), Error> {
    match mode {
        ParsingMode::Strict => Err(e),
        ParsingMode::Lenient => {
            log::warn!("Malformed path data: {}. Skipped.", e);
            Ok(())
        }
    }
}
