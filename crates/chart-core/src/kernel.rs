// File: crates/chart-core/src/kernel.rs
// Summary: Immutable weighted window used by convolution, with arithmetic and common shapes.

use crate::error::{ChartError, Result};
use crate::types::MAX_KERNEL_LENGTH;

/// Ordered weights plus the index of the weight aligned with the current sample.
/// Contract: at least one weight, all weights finite, `offset < len`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f64>,
    offset: usize,
}

impl Kernel {
    /// Kernel centred on its middle weight (`offset = len / 2`).
    pub fn new(weights: impl Into<Vec<f64>>) -> Result<Self> {
        let weights = weights.into();
        let offset = weights.len() / 2;
        Self::with_offset(weights, offset)
    }

    pub fn with_offset(weights: impl Into<Vec<f64>>, offset: usize) -> Result<Self> {
        let weights = weights.into();
        if weights.is_empty() {
            return Err(ChartError::InvalidConfiguration("kernel has no weights".into()));
        }
        if offset >= weights.len() {
            return Err(ChartError::InvalidConfiguration(format!(
                "kernel offset {offset} outside {} weights",
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ChartError::InvalidConfiguration("kernel weights must be finite".into()));
        }
        Ok(Self { weights, offset })
    }

    /// Single weight 1.0; convolving with it reproduces the input.
    pub fn identity() -> Self {
        Self { weights: vec![1.0], offset: 0 }
    }

    /// `size` equal weights of `value`.
    pub fn uniform(size: usize, offset: usize, value: f64) -> Result<Self> {
        Self::with_offset(vec![value; size], offset)
    }

    /// Row `size - 1` of Pascal's triangle scaled to sum 1, centred.
    /// Built by repeated pairwise averaging, so large sizes never overflow.
    pub fn binomial(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_KERNEL_LENGTH {
            return Err(ChartError::InvalidConfiguration(format!(
                "binomial kernel size {size} outside 1..={MAX_KERNEL_LENGTH}"
            )));
        }
        let mut weights = Vec::with_capacity(size);
        weights.push(1.0f64);
        for _ in 1..size {
            weights.push(0.0);
            for j in (1..weights.len()).rev() {
                weights[j] = (weights[j] + weights[j - 1]) / 2.0;
            }
            weights[0] /= 2.0;
        }
        Self::new(weights)
    }

    /// Binomial kernel approximating a Gaussian of the given variance
    /// (`size = floor(4 * variance) + 1`).
    pub fn binomial_for_variance(variance: f64) -> Result<Self> {
        if !variance.is_finite() || variance < 0.0 {
            return Err(ChartError::InvalidConfiguration(format!(
                "binomial variance must be a non-negative number, got {variance}"
            )));
        }
        let span = (variance * 4.0).floor();
        if span >= MAX_KERNEL_LENGTH as f64 {
            return Err(ChartError::InvalidConfiguration(format!(
                "binomial variance {variance} needs more than {MAX_KERNEL_LENGTH} weights"
            )));
        }
        Self::binomial(span as usize + 1)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Never true for a constructed kernel.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at index `k` counted from the first weight; 0.0 outside the support.
    pub fn weight(&self, k: usize) -> f64 {
        self.weights.get(k).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Scale so the weights sum to 1.
    pub fn normalize(&self) -> Result<Self> {
        let sum = self.sum();
        if sum == 0.0 || !sum.is_finite() {
            return Err(ChartError::InvalidConfiguration(format!(
                "cannot normalize kernel with weight sum {sum}"
            )));
        }
        Ok(self.mul(1.0 / sum))
    }

    pub fn negate(&self) -> Self {
        self.mul(-1.0)
    }

    pub fn mul(&self, factor: f64) -> Self {
        Self { weights: self.weights.iter().map(|w| w * factor).collect(), offset: self.offset }
    }

    /// Element-wise sum aligned on the offsets; the result covers both supports.
    pub fn add(&self, other: &Kernel) -> Self {
        let lead = self.offset.max(other.offset);
        let trail = (self.len() - self.offset).max(other.len() - other.offset);
        let mut weights = vec![0.0; lead + trail];
        for kernel in [self, other] {
            let start = lead - kernel.offset;
            for (k, w) in kernel.weights.iter().enumerate() {
                weights[start + k] += w;
            }
        }
        Self { weights, offset: lead }
    }
}
