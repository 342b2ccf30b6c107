// File: crates/chart-core/src/statistics.rs
// Summary: Per-column and pooled aggregates (count, sum, mean, variance, min, max).

use crate::error::{ChartError, Result};
use crate::source::DataSource;

/// Aggregates over one pool of finite values.
/// Contract: `count == 0` implies `sum == 0` and NaN for the other fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aggregate {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl Aggregate {
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Snapshot of a source's aggregates, computed in one pass over all cells.
#[derive(Clone, Debug)]
pub struct Statistics {
    rows: usize,
    columns: Vec<Aggregate>,
    all: Aggregate,
}

impl Statistics {
    /// Scan `source` and aggregate every finite cell. NaN and infinities are skipped.
    pub fn compute<S: DataSource + ?Sized>(source: &S) -> Self {
        let rows = source.row_count();
        let cols = source.column_count();
        let mut per_column = vec![Accumulator::default(); cols];
        let mut pooled = Accumulator::default();
        for row in 0..rows {
            for (col, acc) in per_column.iter_mut().enumerate() {
                let Ok(v) = source.get_f64(col, row) else { continue };
                if !v.is_finite() {
                    continue;
                }
                acc.push(v);
                pooled.push(v);
            }
        }
        log::debug!("statistics refreshed over {rows} rows x {cols} columns");
        Self {
            rows,
            columns: per_column.iter().map(Accumulator::finish).collect(),
            all: pooled.finish(),
        }
    }

    /// Aggregate of a single column.
    pub fn column(&self, col: usize) -> Result<&Aggregate> {
        self.columns
            .get(col)
            .ok_or_else(|| ChartError::column(col, self.columns.len()))
    }

    /// Aggregate treating every column as one pool.
    pub fn all(&self) -> &Aggregate {
        &self.all
    }

    /// Row count of the source when the snapshot was taken.
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

// Welford running mean/variance.
#[derive(Clone, Copy, Debug)]
struct Accumulator {
    count: usize,
    sum: f64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self { count: 0, sum: 0.0, mean: 0.0, m2: 0.0, min: f64::INFINITY, max: f64::NEG_INFINITY }
    }
}

impl Accumulator {
    fn push(&mut self, v: f64) {
        self.count += 1;
        self.sum += v;
        let delta = v - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (v - self.mean);
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    fn finish(&self) -> Aggregate {
        if self.count == 0 {
            return Aggregate {
                count: 0,
                sum: 0.0,
                mean: f64::NAN,
                variance: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }
        Aggregate {
            count: self.count,
            sum: self.sum,
            mean: self.mean,
            variance: self.m2 / self.count as f64,
            min: self.min,
            max: self.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_matches_two_pass_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut acc = Accumulator::default();
        data.iter().for_each(|&v| acc.push(v));
        let agg = acc.finish();
        assert_eq!(agg.count, 8);
        assert!((agg.mean - 5.0).abs() < 1e-12);
        assert!((agg.variance - 4.0).abs() < 1e-12);
        assert!((agg.std_dev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_accumulator_is_nan() {
        let agg = Accumulator::default().finish();
        assert!(agg.is_empty());
        assert_eq!(agg.sum, 0.0);
        assert!(agg.mean.is_nan() && agg.min.is_nan() && agg.max.is_nan());
    }
}
