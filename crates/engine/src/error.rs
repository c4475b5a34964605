use std::result;

/// Error types for liquidtype-engine.
///
/// Only structural construction failures are hard errors; everything that
/// can go wrong during a fit pass degrades to a skipped or soft-bounded
/// pass instead (see [`SkipReason`](crate::SkipReason)).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid font size: {0} px")]
    InvalidFontSize(f32),
}

pub type Result<T> = result::Result<T, Error>;
