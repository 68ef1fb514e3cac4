//! Series query error types.

use thiserror::Error;

/// Errors raised by series queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("series lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Result type for series queries.
pub type Result<T> = std::result::Result<T, SeriesError>;
