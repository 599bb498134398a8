//! Codec error types

use std::io;
use std::path::PathBuf;

/// Result alias for codec operations
pub type Result<T> = std::result::Result<T, PgmError>;

/// Which stage of a conversion failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    /// Opening, reading or writing a file
    Io,
    /// Magic token, dimensions or maxValue
    Header,
    /// Sample or run tokens
    Body,
}

/// Errors that can occur while reading, writing or converting images
#[derive(Debug, thiserror::Error)]
pub enum PgmError {
    #[error("Failed to open input {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create output {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read image data: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to write image data: {0}")]
    Write(#[source] io::Error),

    #[error("Missing magic token")]
    MissingMagic,

    #[error("Unexpected magic token {found:?} (expected {expected:?})")]
    UnexpectedMagic { expected: &'static str, found: String },

    #[error("Missing image header after magic token")]
    MissingHeader,

    #[error("Invalid image dimensions: {0:?}")]
    InvalidDimensions(String),

    #[error("Image dimensions must be at least 1x1")]
    ZeroDimensions,

    #[error("Missing maximum sample value")]
    MissingMaxValue,

    #[error("Invalid maximum sample value: {0:?}")]
    InvalidMaxValue(String),

    #[error("Image declares {expected} samples but only {found} were found")]
    MissingSamples { expected: usize, found: usize },

    #[error("Invalid sample {token:?} at index {index}")]
    InvalidSample { index: usize, token: String },

    #[error("Invalid run token {token:?} at index {index}")]
    InvalidRun { index: usize, token: String },
}

impl PgmError {
    /// Stage of the conversion this error belongs to
    pub fn stage(&self) -> ErrorStage {
        match self {
            PgmError::Open { .. } | PgmError::Create { .. } | PgmError::Read(_) | PgmError::Write(_) => {
                ErrorStage::Io
            }
            PgmError::MissingMagic
            | PgmError::UnexpectedMagic { .. }
            | PgmError::MissingHeader
            | PgmError::InvalidDimensions(_)
            | PgmError::ZeroDimensions
            | PgmError::MissingMaxValue
            | PgmError::InvalidMaxValue(_) => ErrorStage::Header,
            PgmError::MissingSamples { .. }
            | PgmError::InvalidSample { .. }
            | PgmError::InvalidRun { .. } => ErrorStage::Body,
        }
    }
}
