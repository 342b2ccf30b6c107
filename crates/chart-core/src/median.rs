// File: crates/chart-core/src/median.rs
// Summary: Sliding-window median of source columns.

use crate::error::{ChartError, Result};
use crate::filter::{EdgeMode, Filter, WindowRule};

/// Window of `size` samples whose sample `offset` is aligned with the output row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MedianWindow {
    size: usize,
    offset: usize,
}

impl MedianWindow {
    pub fn new(size: usize, offset: usize) -> Result<Self> {
        if size == 0 {
            return Err(ChartError::InvalidConfiguration("median window size must be positive".into()));
        }
        if offset >= size {
            return Err(ChartError::InvalidConfiguration(format!(
                "median offset {offset} outside window of {size}"
            )));
        }
        Ok(Self { size, offset })
    }

    /// Window of `size` samples centred on the output row.
    pub fn centered(size: usize) -> Result<Self> {
        Self::new(size, size / 2)
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Filter replacing each selected column with its moving median.
pub type Median = Filter<MedianWindow>;

impl WindowRule for MedianWindow {
    fn id(&self) -> &'static str {
        "median"
    }

    fn span(&self) -> usize {
        self.size
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn supports(&self, mode: EdgeMode) -> bool {
        mode != EdgeMode::Zero
    }

    fn reduce(&self, window: &[f64], scratch: &mut Vec<f64>) -> f64 {
        scratch.clear();
        scratch.extend_from_slice(window);
        median_in_place(scratch)
    }
}

/// Median of `values` (reordered in place). Even lengths average the two
/// central values; an empty slice yields NaN.
pub fn median_in_place(values: &mut [f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }
    values.sort_unstable_by(f64::total_cmp);
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}
