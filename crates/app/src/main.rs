//! Aritygen binary.

use std::io::Write;
use std::process::ExitCode;

use aritygen::{CliArgs, FAILURE_EXIT, USAGE};
use aritygen_infrastructure::ConfigLoader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so that --stdout output stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            return Ok(ExitCode::from(FAILURE_EXIT));
        }
    };
    if args.help {
        write!(std::io::stdout(), "{USAGE}")?;
        return Ok(ExitCode::SUCCESS);
    }

    tracing::debug!("aritygen v{}", env!("CARGO_PKG_VERSION"));

    let mut stdout = std::io::stdout().lock();
    match aritygen::run(&args, ConfigLoader::new(), &mut stdout).await {
        Ok(outcome) => Ok(outcome.exit_code()),
        Err(e) => {
            tracing::error!("{e:#}");
            Ok(ExitCode::from(FAILURE_EXIT))
        }
    }
}
