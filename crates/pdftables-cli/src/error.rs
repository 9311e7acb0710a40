use pdftables::PdfError;
use thiserror::Error;

/// Failures reported to the caller as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or rejected command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// The document could not be opened or scanned.
    #[error(transparent)]
    Document(#[from] PdfError),
}

impl CliError {
    /// Usage error from a clap parse failure, keeping only the first line
    /// of clap's report without its `error: ` prefix.
    pub fn from_clap(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let first = rendered.lines().next().unwrap_or_default();
        let message = first.strip_prefix("error: ").unwrap_or(first);
        CliError::Usage(message.trim().to_string())
    }
}
