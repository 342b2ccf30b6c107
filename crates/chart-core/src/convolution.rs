// File: crates/chart-core/src/convolution.rs
// Summary: Discrete convolution of source columns with a Kernel.

use crate::filter::{Filter, WindowRule};
use crate::kernel::Kernel;

/// Filter computing `sum_k w[k] * src(i + k - offset)` for each selected column.
pub type Convolution = Filter<Kernel>;

impl WindowRule for Kernel {
    fn id(&self) -> &'static str {
        "convolution"
    }

    fn span(&self) -> usize {
        self.len()
    }

    fn offset(&self) -> usize {
        Kernel::offset(self)
    }

    fn reduce(&self, window: &[f64], _scratch: &mut Vec<f64>) -> f64 {
        self.weights().iter().zip(window).map(|(w, v)| w * v).sum()
    }
}

impl Filter<Kernel> {
    pub fn kernel(&self) -> &Kernel {
        self.rule()
    }
}
