//! Failures of a `brushgen` run and the exit code each one maps to.

use brushgen_core::BrushError;
use thiserror::Error;

/// Parameters or canvas size rejected before any stamping happened.
pub const EXIT_GENERATOR: i32 = 10;
/// `Brush.png` could not be encoded or written.
pub const EXIT_WRITE: i32 = 11;
/// The `--json` report could not be produced.
pub const EXIT_REPORT: i32 = 13;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot build brush texture: {0}")]
    Generator(BrushError),

    #[error("cannot write brush texture: {0}")]
    Write(String),

    #[error("cannot encode run report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Generator(_) => EXIT_GENERATOR,
            CliError::Write(_) => EXIT_WRITE,
            CliError::Report(_) => EXIT_REPORT,
        }
    }
}

impl From<BrushError> for CliError {
    fn from(e: BrushError) -> Self {
        match e {
            // generation never touches the filesystem, so any I/O failure is the PNG write
            BrushError::Io(msg) => CliError::Write(msg),
            other => CliError::Generator(other),
        }
    }
}
