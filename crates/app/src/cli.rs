//! Command-line arguments.

use std::path::PathBuf;

use aritygen_domain::{DomainError, FamilySelection};

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
Usage: aritygen [OPTIONS] [FAMILY...]

Generates the arity-indexed OpFlow headers.

Families:
  equation-holder, expression, stencil-holder, unified-solve, all (default)

Options:
      --config <FILE>   Configuration file (default: ./aritygen.toml if present)
      --out-dir <DIR>   Directory that relative destinations resolve against
      --check           Compare generated text with the files on disk, write nothing
      --stdout          Print the selected artifacts instead of writing them
  -h, --help            Print this help

Environment:
  ARITYGEN_<FAMILY>__MAX_ARITY, ARITYGEN_<FAMILY>__DESTINATION, ARITYGEN_OUTPUT_DIR
  RUST_LOG              Log filter (default: info)
";

/// Error type for argument parsing.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An option that is not recognised.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// An option that takes a value was given none.
    #[error("option {0} requires a value")]
    MissingValue(&'static str),

    /// Options that cannot be combined.
    #[error("{0} and {1} cannot be used together")]
    Conflict(&'static str, &'static str),

    /// A positional argument that names no family.
    #[error(transparent)]
    Family(#[from] DomainError),
}

/// What the output of a run goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Replace destination files.
    #[default]
    Write,
    /// Compare with destination files.
    Check,
    /// Print to standard output.
    Stdout,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// Override of the configured output directory.
    pub out_dir: Option<PathBuf>,
    /// Where the output goes.
    pub mode: OutputMode,
    /// Families to generate.
    pub selection: FamilySelection,
    /// Print usage and exit.
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] for unknown options, options missing their
    /// value, conflicting modes, or unknown family names.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = Self::default();
        let mut families = Vec::new();
        let mut check = false;
        let mut stdout = false;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--check" => check = true,
                "--stdout" => stdout = true,
                "--config" => {
                    parsed.config = Some(args.next().ok_or(CliError::MissingValue("--config"))?.into());
                }
                "--out-dir" => {
                    parsed.out_dir =
                        Some(args.next().ok_or(CliError::MissingValue("--out-dir"))?.into());
                }
                other => {
                    if let Some(value) = other.strip_prefix("--config=") {
                        parsed.config = Some(value.into());
                    } else if let Some(value) = other.strip_prefix("--out-dir=") {
                        parsed.out_dir = Some(value.into());
                    } else if other.starts_with('-') {
                        return Err(CliError::UnknownOption(arg));
                    } else {
                        families.push(arg);
                    }
                }
            }
        }

        parsed.mode = match (check, stdout) {
            (true, true) => return Err(CliError::Conflict("--check", "--stdout")),
            (true, false) => OutputMode::Check,
            (false, true) => OutputMode::Stdout,
            (false, false) => OutputMode::Write,
        };
        parsed.selection = FamilySelection::from_names(families)?;
        Ok(parsed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use aritygen_domain::Family;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_arguments_writes_everything() {
        let args = CliArgs::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args, CliArgs::default());
        assert_eq!(args.selection, FamilySelection::All);
    }

    #[test]
    fn options_and_families() {
        let args = CliArgs::parse([
            "--config",
            "gen.toml",
            "--out-dir=include",
            "--check",
            "stencil-holder",
            "expression",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("gen.toml")));
        assert_eq!(args.out_dir, Some(PathBuf::from("include")));
        assert_eq!(args.mode, OutputMode::Check);
        assert_eq!(
            args.selection.families(),
            vec![Family::Expression, Family::StencilHolder]
        );
    }

    #[test]
    fn help_flag() {
        assert!(CliArgs::parse(["-h"]).unwrap().help);
        assert!(CliArgs::parse(["--help"]).unwrap().help);
    }

    #[test]
    fn missing_value() {
        let err = CliArgs::parse(["--out-dir"]).unwrap_err();
        assert!(matches!(err, CliError::MissingValue("--out-dir")));
    }

    #[test]
    fn unknown_option_and_family() {
        assert!(matches!(
            CliArgs::parse(["--verbose"]).unwrap_err(),
            CliError::UnknownOption(ref o) if o == "--verbose"
        ));
        assert!(matches!(
            CliArgs::parse(["tensor"]).unwrap_err(),
            CliError::Family(DomainError::UnknownFamily(_))
        ));
    }

    #[test]
    fn check_and_stdout_conflict() {
        assert!(matches!(
            CliArgs::parse(["--check", "--stdout"]).unwrap_err(),
            CliError::Conflict(..)
        ));
    }
}
