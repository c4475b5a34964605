use std::{io, result};

use read_fonts::ReadError;

/// Error types for liquidtype-measure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("failed to read font file: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;
