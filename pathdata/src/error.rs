/// List of all path data errors.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// An input data ended earlier than expected.
    UnexpectedEndOfStream,

    /// An input text contains unknown data.
    ///
    /// For example, a number after a ClosePath or a non-command letter.
    UnexpectedData(usize),

    /// An invalid number.
    InvalidNumber(usize),

    /// An arc flag is not a single `0` or `1` char.
    InvalidFlag(usize),

    /// A command ended before all of its arguments were read.
    ///
    /// `cmd` is the command letter.
    MissingArguments {
        /// The command letter.
        cmd: char,
        /// Position of the first missing argument.
        pos: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::UnexpectedEndOfStream => {
                write!(f, "unexpected end of stream")
            }
            Error::UnexpectedData(pos) => {
                write!(f, "unexpected data at position {}", pos)
            }
            Error::InvalidNumber(pos) => {
                write!(f, "invalid number at position {}", pos)
            }
            Error::InvalidFlag(pos) => {
                write!(f, "invalid arc flag at position {}", pos)
            }
            Error::MissingArguments { cmd, pos } => {
                write!(f, "'{}' is missing arguments at position {}", cmd, pos)
            }
        }
    }
}

impl std::error::Error for Error {}
