// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::process;

use pico_args::Arguments;

use styledna::pathdata;

const HELP: &str = "\
styledna infers an icon set style and enforces it on new icons.

USAGE:
  styledna round [OPTIONS] <path-data>      # reduce path data precision
  styledna analyze [OPTIONS] <in-svg>...    # print an icon set style
  styledna check [OPTIONS] <in-svg>         # check an icon against a style

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information
  --quiet                           Disables warnings
  --verbose                         Prints debug information

ROUND OPTIONS:
  --precision NUM                   Sets the coordinates numeric precision
                                    [values: 0..12 (inclusive)] [default: 2]
  --no-compact                      Writes all separators and command letters
  --remove-leading-zero             Writes '.5' instead of '0.5'

ANALYZE OPTIONS:
  --discrete                        Snaps the stroke width to 2, 3 or 4

CHECK OPTIONS:
  --rules RULES                     Sets the rules to check against.
                                    Either 'feather' or a path to a manifest file
                                    with 'key: value' lines
                                    [default: feather]
  -o, --output PATH                 Saves the auto-fixed SVG

  Exits with code 2 when the icon has errors.

ARGS:
  <path-data>                       SVG path data, like 'M10 20L30 40'
  <in-svg>                          Input file
";

#[derive(Debug)]
enum Command {
    Round {
        precision: u8,
        compact: bool,
        remove_leading_zero: bool,
        data: String,
    },
    Analyze {
        discrete: bool,
        files: Vec<PathBuf>,
    },
    Check {
        rules: RulesFrom,
        output: Option<PathBuf>,
        input: PathBuf,
    },
}

#[derive(Clone, PartialEq, Debug)]
enum RulesFrom {
    Feather,
    File(PathBuf),
}

#[derive(Debug)]
struct Args {
    quiet: bool,
    verbose: bool,
    command: Command,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    let quiet = input.contains("--quiet");
    let verbose = input.contains("--verbose");

    let command = match input.subcommand()?.as_deref() {
        Some("round") => Command::Round {
            precision: input
                .opt_value_from_fn("--precision", parse_precision)?
                .unwrap_or(2),
            compact: !input.contains("--no-compact"),
            remove_leading_zero: input.contains("--remove-leading-zero"),
            data: input.free_from_str()?,
        },
        Some("analyze") => Command::Analyze {
            discrete: input.contains("--discrete"),
            files: input.finish().into_iter().map(PathBuf::from).collect(),
        },
        Some("check") => Command::Check {
            rules: input
                .opt_value_from_fn("--rules", parse_rules)?
                .unwrap_or(RulesFrom::Feather),
            output: input.opt_value_from_str(["-o", "--output"])?,
            input: input.free_from_str()?,
        },
        Some(name) => {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown command '{}'", name),
            })
        }
        None => return Err(pico_args::Error::MissingArgument),
    };

    Ok(Args {
        quiet,
        verbose,
        command,
    })
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision NUM value")?;

    if n <= pathdata::MAX_PRECISION {
        Ok(n)
    } else {
        Err(format!(
            "precision NUM cannot be larger than {}",
            pathdata::MAX_PRECISION
        ))
    }
}

fn parse_rules(s: &str) -> Result<RulesFrom, String> {
    match s {
        "" => Err("RULES cannot be empty".to_string()),
        "feather" => Ok(RulesFrom::Feather),
        _ => Ok(RulesFrom::File(PathBuf::from(s))),
    }
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            let level = if args.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            };
            log::set_max_level(level);
        }
    }

    match process(args.command) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    }
}

// Returns `false` when a checked icon has errors.
fn process(command: Command) -> Result<bool, String> {
    match command {
        Command::Round {
            precision,
            compact,
            remove_leading_zero,
            data,
        } => {
            let opt = pathdata::WriteOptions {
                compact,
                remove_leading_zero,
            };
            println!("{}", pathdata::round_path_data_with(&data, precision, &opt));
        }
        Command::Analyze { discrete, files } => {
            if files.is_empty() {
                return Err("no input files".to_string());
            }

            let mut icons = Vec::with_capacity(files.len());
            for path in &files {
                match std::fs::read_to_string(path) {
                    Ok(svg) => icons.push(styledna::Icon::new(svg)),
                    Err(e) => log::warn!("Failed to read '{}' cause {}.", path.display(), e),
                }
            }

            let opt = if discrete {
                styledna::AnalyzerOptions::discrete()
            } else {
                styledna::AnalyzerOptions::default()
            };

            let summary = styledna::analyze(&icons, &opt).map_err(|e| e.to_string())?;
            println!("{}", summary);
        }
        Command::Check {
            rules,
            output,
            input,
        } => {
            let rules = match rules {
                RulesFrom::Feather => styledna::EnforcementRules::feather(),
                RulesFrom::File(ref path) => {
                    let text = std::fs::read_to_string(path)
                        .map_err(|_| "failed to read the rules file".to_string())?;
                    styledna::EnforcementRules::from_manifest(&text)
                }
            };

            let svg = std::fs::read_to_string(&input)
                .map_err(|_| "failed to read the input file".to_string())?;

            let result = styledna::enforce(&svg, &rules);
            for v in &result.violations {
                println!("{}", v);
            }

            for change in &result.changes {
                println!("changed {}", change);
            }

            println!(
                "score: {} ({})",
                result.score,
                if result.passed { "passed" } else { "failed" }
            );

            if let Some(path) = output {
                std::fs::write(path, &result.auto_fixed)
                    .map_err(|_| "failed to write the output file".to_string())?;
            }

            return Ok(result.passed);
        }
    }

    Ok(true)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
