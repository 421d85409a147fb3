#![forbid(unsafe_code)]

use crate::check::Violation;
use thiserror::Error;

/// Errors produced while constructing or verifying a [`Frame`](crate::Frame).
///
/// Construction-time errors abort the whole build; no partial frame is ever
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// No source adapter matches the input. The category text names the
    /// offending value's runtime category (for string scalars, the string
    /// itself).
    #[error("Cannot create Frame from '{category}'")]
    UnrecognizedSource { category: String },

    /// A stored value does not fit its column's declared storage type.
    #[error("value at row {row} of column {column} does not fit storage type {stype}")]
    StypeOverflow {
        column: usize,
        row: usize,
        stype: &'static str,
    },

    /// An explicit name list does not line up with the source's column count.
    #[error("cannot assign {given} names to {expected} columns")]
    InvalidNames { expected: usize, given: usize },

    /// Strict-mode consistency check failed; carries the first violation.
    #[error("frame failed consistency check: {0}")]
    Inconsistent(Violation),
}
