// File: crates/chart-core/src/axis.rs
// Summary: Axis model (an immutable numeric range) and scale kinds.

use crate::error::{ChartError, Result};
use crate::source::DataSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log10,
}

/// Numeric domain `[min, max]` that renderers map onto view space.
/// Contract: both bounds finite and `min <= max`. Positivity for
/// logarithmic scales is checked by the renderer, not here, so one axis
/// can be shared by renderers of different kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    min: f64,
    max: f64,
}

impl Axis {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidAxisRange { min, max, reason: "bounds must be finite" });
        }
        if min > max {
            return Err(ChartError::InvalidAxisRange { min, max, reason: "min exceeds max" });
        }
        Ok(Self { min, max })
    }

    /// Axis spanning the finite values of column `col` of `source`.
    pub fn from_column<S: DataSource + ?Sized>(source: &S, col: usize) -> Result<Self> {
        let stats = source.statistics();
        let agg = stats.column(col)?;
        if agg.is_empty() {
            return Err(ChartError::InvalidAxisRange {
                min: agg.min,
                max: agg.max,
                reason: "column has no finite values",
            });
        }
        Self::new(agg.min, agg.max)
    }

    pub fn min(&self) -> f64 { self.min }
    pub fn max(&self) -> f64 { self.max }
    pub fn span(&self) -> f64 { self.max - self.min }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}
