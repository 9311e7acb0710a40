mod cli;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use cli::Cli;
use error::CliError;
use output::ErrorPayload;
use pdftables::ExtractionResult;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let outcome = run();
    let written = match &outcome {
        Ok(result) => output::print_json(result),
        Err(err) => {
            tracing::debug!(error = %err, "extraction failed");
            output::print_json(&ErrorPayload {
                error: &err.to_string(),
            })
        }
    };
    if let Err(e) = &written {
        tracing::error!(error = %e, "failed to write output");
    }

    match (outcome, written) {
        (Ok(_), Ok(())) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn run() -> Result<ExtractionResult, CliError> {
    let cli = Cli::try_parse().or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => Err(CliError::from_clap(&e)),
    })?;
    if !cli.ignored.is_empty() {
        tracing::debug!(count = cli.ignored.len(), "ignoring extra arguments");
    }
    let path = cli
        .file
        .ok_or_else(|| CliError::Usage("PDF path required".to_string()))?;

    tracing::debug!(path = %path.display(), "extracting tables");
    Ok(pdftables::extract(&path)?)
}
