//! Error types for bbox-align.

use thiserror::Error;

/// Primary error type for line reconstruction.
///
/// Only input problems are reported; degenerate geometry is handled with
/// sentinel values and never surfaces here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    #[error("bounding box {index} has {found} corners, expected 4")]
    BoxArity { index: usize, found: usize },

    #[error("boundary has {found} points, expected 4")]
    BoundaryArity { found: usize },

    #[error(
        "bounding box {index} is not clockwise ({violation}); \
         expected p1 top-left, p2 top-right, p3 bottom-right, p4 bottom-left"
    )]
    NotClockwise {
        index: usize,
        violation: &'static str,
    },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

/// Convenience Result type alias for AlignError.
pub type Result<T> = std::result::Result<T, AlignError>;
