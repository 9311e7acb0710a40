use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Print the ruled tables of a PDF document as JSON.
#[derive(Debug, Parser)]
#[command(name = "pdftables", about, version)]
pub struct Cli {
    /// Path to the PDF file
    #[arg(value_name = "FILE", allow_hyphen_values = true)]
    pub file: Option<PathBuf>,

    /// Anything after FILE is accepted and ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<OsString>,
}
