//! Aritygen - generator for the arity-indexed OpFlow headers.
//!
//! The binary is a thin shell around [`run`], which wires configuration,
//! the [`GenerateArtifacts`] use case and the file system store together.

pub mod cli;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use aritygen_application::{
    ApplicationError, GenerateArtifacts, GenerateMode, GenerationSummary, generate_family,
};
use aritygen_infrastructure::{ConfigLoader, TokioArtifactStore};
use tracing::{info, warn};

pub use cli::{CliArgs, CliError, OutputMode, USAGE};

/// Exit status for invalid arguments, invalid configuration or failed families.
pub const FAILURE_EXIT: u8 = 2;

/// Exit status for a check run that found outdated artifacts.
pub const OUTDATED_EXIT: u8 = 1;

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every selected artifact was written, printed or found up to date.
    Success,
    /// Check mode found a stale or missing artifact.
    Outdated,
    /// At least one family failed.
    Failed,
}

impl RunOutcome {
    fn from_summary(summary: &GenerationSummary) -> Self {
        if !summary.is_success() {
            Self::Failed
        } else if summary.has_outdated() {
            Self::Outdated
        } else {
            Self::Success
        }
    }

    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Outdated => ExitCode::from(OUTDATED_EXIT),
            Self::Failed => ExitCode::from(FAILURE_EXIT),
        }
    }
}

/// Runs the generator for parsed arguments.
///
/// `loader` supplies the configuration layers below the command line;
/// `--config` is applied on top of it. In stdout mode the artifacts are
/// written to `out`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid, or
/// if writing to `out` fails. Failures of individual families are not errors;
/// they yield [`RunOutcome::Failed`].
pub async fn run<W: Write>(
    args: &CliArgs,
    loader: ConfigLoader,
    out: &mut W,
) -> anyhow::Result<RunOutcome> {
    let loader = match &args.config {
        Some(path) => loader.with_file(path),
        None => loader,
    };
    let mut config = loader.load().context("could not load configuration")?;
    if let Some(dir) = &args.out_dir {
        config.output_dir.clone_from(dir);
    }

    let mode = match args.mode {
        OutputMode::Stdout => {
            let targets = config
                .targets(&args.selection)
                .context("invalid configuration")?;
            for target in &targets {
                let artifact = generate_family(target.family, target.max_arity.get());
                out.write_all(artifact.text().as_bytes())
                    .context("could not write to standard output")?;
            }
            out.flush().context("could not write to standard output")?;
            return Ok(RunOutcome::Success);
        }
        OutputMode::Write => GenerateMode::Write,
        OutputMode::Check => GenerateMode::Check,
    };

    let use_case = GenerateArtifacts::new(TokioArtifactStore::new());
    let summary = use_case
        .execute_config(&config, &args.selection, mode)
        .await
        .context("invalid configuration")?;

    let outcome = RunOutcome::from_summary(&summary);
    match outcome {
        RunOutcome::Success => info!(artifacts = summary.reports.len(), "done"),
        RunOutcome::Outdated => warn!("generated headers are out of date; rerun aritygen"),
        RunOutcome::Failed => {
            let failed: Vec<String> = summary
                .failures
                .iter()
                .filter_map(ApplicationError::family)
                .map(|family| family.to_string())
                .collect();
            warn!(families = ?failed, "some families failed");
        }
    }
    Ok(outcome)
}
