// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (cell values, column kinds, scale defaults).

use std::cmp::Ordering;
use std::fmt;

/// Rendering-space length used when no explicit shape length is configured.
pub const DEFAULT_SHAPE_LENGTH: f64 = 1.0;
/// Step multiplier inside each decade of a logarithmic axis (1 => 1,2,..,10).
pub const DEFAULT_LOG_TICK_SPACING: f64 = 1.0;
/// Approximate tick count aimed for when a linear axis picks its own spacing.
pub const AUTO_TICK_TARGET: usize = 10;
/// Relative tolerance used to treat two tick values as the same tick.
pub const TICK_EPSILON: f64 = 1e-10;
/// Upper bound on computed ticks for a single axis request.
pub const MAX_TICKS: usize = 10_000;
/// Largest kernel the factories will build.
pub const MAX_KERNEL_LENGTH: usize = 1 << 14;

/// Declared kind of a table column.
/// Contract: fixed for the lifetime of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Real,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Real => write!(f, "real"),
        }
    }
}

/// A single numeric cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    /// Runtime kind of the value.
    pub const fn kind(&self) -> ColumnType {
        match self {
            Number::Integer(_) => ColumnType::Integer,
            Number::Real(_) => ColumnType::Real,
        }
    }

    /// Numeric value widened to `f64`.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Real(v) => v,
        }
    }

    /// Whether the cell fits a column of kind `column`.
    pub fn is_assignable_to(&self, column: ColumnType) -> bool {
        self.kind() == column
    }

    /// Total order: integers compare exactly, anything else via `f64::total_cmp`.
    pub fn total_cmp(&self, other: &Number) -> Ordering {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }

    /// Value equality where NaN equals NaN (used for change detection).
    pub fn same_value(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Real(a), Number::Real(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self { Number::Integer(v) }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self { Number::Integer(v as i64) }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self { Number::Real(v) }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Real(v) => write!(f, "{v}"),
        }
    }
}
