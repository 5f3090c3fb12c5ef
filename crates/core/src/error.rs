//! Error types for brushgen.

use thiserror::Error;

/// Errors produced while building, stamping, or persisting a canvas.
#[derive(Debug, Error)]
pub enum BrushError {
    /// Width or height was zero, or `width * height * 3` overflowed.
    #[error("invalid dimensions: width and height must be non-zero and fit in memory")]
    InvalidDimensions,

    /// A generator parameter was out of its valid domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// Encoding or writing the output image failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for BrushError {
    fn from(e: std::io::Error) -> Self {
        BrushError::Io(e.to_string())
    }
}
