/// A path command kind.
///
/// The same kind is used for both absolute and relative commands.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HLineTo,
    VLineTo,
    CurveCubic,
    CurveSmoothCubic,
    CurveQuadratic,
    CurveSmoothQuadratic,
    Arc,
    ClosePath,
}

impl CommandKind {
    /// Resolves a command letter.
    ///
    /// Returns the kind and whether the command is relative.
    pub fn from_letter(c: u8) -> Option<(Self, bool)> {
        let kind = match c.to_ascii_uppercase() {
            b'M' => CommandKind::MoveTo,
            b'L' => CommandKind::LineTo,
            b'H' => CommandKind::HLineTo,
            b'V' => CommandKind::VLineTo,
            b'C' => CommandKind::CurveCubic,
            b'S' => CommandKind::CurveSmoothCubic,
            b'Q' => CommandKind::CurveQuadratic,
            b'T' => CommandKind::CurveSmoothQuadratic,
            b'A' => CommandKind::Arc,
            b'Z' => CommandKind::ClosePath,
            _ => return None,
        };

        Some((kind, c.is_ascii_lowercase()))
    }

    /// Returns the command letter.
    pub fn letter(self, relative: bool) -> char {
        let c = match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::HLineTo => 'H',
            CommandKind::VLineTo => 'V',
            CommandKind::CurveCubic => 'C',
            CommandKind::CurveSmoothCubic => 'S',
            CommandKind::CurveQuadratic => 'Q',
            CommandKind::CurveSmoothQuadratic => 'T',
            CommandKind::Arc => 'A',
            CommandKind::ClosePath => 'Z',
        };

        if relative {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }

    /// Returns the number of arguments a single command of this kind consumes.
    pub fn arity(self) -> usize {
        match self {
            CommandKind::MoveTo => 2,
            CommandKind::LineTo => 2,
            CommandKind::HLineTo => 1,
            CommandKind::VLineTo => 1,
            CommandKind::CurveCubic => 6,
            CommandKind::CurveSmoothCubic => 4,
            CommandKind::CurveQuadratic => 4,
            CommandKind::CurveSmoothQuadratic => 2,
            CommandKind::Arc => ARC_ARITY,
            CommandKind::ClosePath => 0,
        }
    }

    /// Checks that an argument at `idx` is a flag and not a number.
    #[inline]
    pub fn is_flag_slot(self, idx: usize) -> bool {
        self == CommandKind::Arc && matches!(idx % ARC_ARITY, LARGE_ARC_SLOT | SWEEP_SLOT)
    }

    /// Checks that the kind draws a curve.
    ///
    /// Arcs are curves too.
    pub fn is_curve(self) -> bool {
        matches!(
            self,
            CommandKind::CurveCubic
                | CommandKind::CurveSmoothCubic
                | CommandKind::CurveQuadratic
                | CommandKind::CurveSmoothQuadratic
                | CommandKind::Arc
        )
    }

    /// Checks that the kind draws a straight line.
    pub fn is_line(self) -> bool {
        matches!(
            self,
            CommandKind::LineTo | CommandKind::HLineTo | CommandKind::VLineTo
        )
    }
}

pub(crate) const ARC_ARITY: usize = 7;
pub(crate) const LARGE_ARC_SLOT: usize = 3;
pub(crate) const SWEEP_SLOT: usize = 4;

/// A path command argument.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Argument {
    /// A coordinate, a radius or a rotation angle.
    Number(f64),
    /// An arc flag.
    Flag(bool),
}

impl Argument {
    /// Returns a number value, if any.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Argument::Number(n) => Some(n),
            Argument::Flag(_) => None,
        }
    }

    /// Returns a flag value, if any.
    #[inline]
    pub fn as_flag(&self) -> Option<bool> {
        match *self {
            Argument::Number(_) => None,
            Argument::Flag(f) => Some(f),
        }
    }
}

/// A single path drawing command.
///
/// The number of arguments always matches the kind arity
/// and arc flags are always stored as [`Argument::Flag`].
#[derive(Clone, PartialEq, Debug)]
pub struct PathCommand {
    kind: CommandKind,
    relative: bool,
    args: Vec<Argument>,
}

impl PathCommand {
    /// Creates a new command.
    ///
    /// Returns `None` when the arguments do not fit the command kind:
    /// a wrong count, a number in an arc flag slot or a flag anywhere else.
    pub fn new(kind: CommandKind, relative: bool, args: Vec<Argument>) -> Option<Self> {
        if args.len() != kind.arity() {
            return None;
        }

        let valid = args.iter().enumerate().all(|(idx, arg)| match arg {
            Argument::Flag(_) => kind.is_flag_slot(idx),
            Argument::Number(_) => !kind.is_flag_slot(idx),
        });

        if !valid {
            return None;
        }

        Some(PathCommand {
            kind,
            relative,
            args,
        })
    }

    /// Creates a ClosePath command.
    pub fn close_path(relative: bool) -> Self {
        PathCommand {
            kind: CommandKind::ClosePath,
            relative,
            args: Vec::new(),
        }
    }

    // The caller guarantees that `args` fit the kind.
    pub(crate) fn new_unchecked(kind: CommandKind, relative: bool, args: Vec<Argument>) -> Self {
        debug_assert_eq!(args.len(), kind.arity());
        PathCommand {
            kind,
            relative,
            args,
        }
    }

    /// Returns the command kind.
    #[inline]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Checks that the command uses relative coordinates.
    #[inline]
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Returns the command letter.
    #[inline]
    pub fn letter(&self) -> char {
        self.kind.letter(self.relative)
    }

    /// Returns command arguments.
    #[inline]
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Returns `(large-arc-flag, sweep-flag)` of an arc command.
    pub fn arc_flags(&self) -> Option<(bool, bool)> {
        if self.kind != CommandKind::Arc {
            return None;
        }

        let large_arc = self.args.get(LARGE_ARC_SLOT)?.as_flag()?;
        let sweep = self.args.get(SWEEP_SLOT)?.as_flag()?;
        Some((large_arc, sweep))
    }

    /// Applies `f` to every numeric argument.
    ///
    /// Flags are copied as is.
    pub fn map_numbers<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let args = self
            .args
            .iter()
            .map(|arg| match *arg {
                Argument::Number(n) => Argument::Number(f(n)),
                Argument::Flag(flag) => Argument::Flag(flag),
            })
            .collect();

        PathCommand::new_unchecked(self.kind, self.relative, args)
    }
}

/// Basic statistics of a parsed path.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct PathStats {
    /// Total number of commands.
    pub commands: usize,
    /// Number of curve and arc commands.
    pub curves: usize,
    /// Number of line commands.
    pub lines: usize,
    /// Number of arc commands.
    pub arcs: usize,
    /// Number of subpaths, i.e. MoveTo commands.
    pub subpaths: usize,
}

impl PathStats {
    /// Collects statistics from a list of commands.
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        let mut stats = PathStats::default();
        for cmd in commands {
            stats.commands += 1;

            let kind = cmd.kind();
            if kind.is_curve() {
                stats.curves += 1;
            }

            if kind.is_line() {
                stats.lines += 1;
            }

            match kind {
                CommandKind::Arc => stats.arcs += 1,
                CommandKind::MoveTo => stats.subpaths += 1,
                _ => {}
            }
        }

        stats
    }

    /// Checks that the path has at least one curve.
    #[inline]
    pub fn has_curves(&self) -> bool {
        self.curves > 0
    }

    /// Checks that the path has at least one straight line.
    #[inline]
    pub fn has_lines(&self) -> bool {
        self.lines > 0
    }
}
