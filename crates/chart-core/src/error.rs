// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy shared by tables, filters and axis renderers.

use thiserror::Error;

/// Errors surfaced by the chart core. All of them are precondition
/// violations reported at the offending call; none are transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A row or cell does not fit the declared column layout.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A row or column coordinate outside the valid bounds.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// A kernel, filter or renderer built with an impossible shape.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An axis range the requested mapping cannot work with.
    #[error("invalid axis range [{min}, {max}]: {reason}")]
    InvalidAxisRange {
        min: f64,
        max: f64,
        reason: &'static str,
    },
}

impl ChartError {
    pub(crate) fn row(index: usize, len: usize) -> Self {
        ChartError::IndexOutOfRange { kind: "row", index, len }
    }

    pub(crate) fn column(index: usize, len: usize) -> Self {
        ChartError::IndexOutOfRange { kind: "column", index, len }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
