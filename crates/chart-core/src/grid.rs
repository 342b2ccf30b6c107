// File: crates/chart-core/src/grid.rs
// Summary: Tick value layout helpers (nice steps, linear multiples, log decades).

use crate::error::{ChartError, Result};
use crate::types::{MAX_TICKS, TICK_EPSILON};

/// Whether two tick values are the same tick within `TICK_EPSILON` (relative).
pub fn same_tick(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= TICK_EPSILON * a.abs().max(b.abs())
}

/// A 1, 2 or 5 times 10^n step giving roughly `target` intervals over `span`.
pub fn nice_step(span: f64, target: usize) -> Option<f64> {
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return None;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    Some(nice * magnitude)
}

/// Significant decimal digits kept below the step when snapping tick values.
const SNAP_DIGITS: i32 = 10;

/// Multiples of `step` inside `[min, max]`, ascending. Bounds within
/// `TICK_EPSILON` of a multiple still get their tick.
pub fn linear_tick_values(min: f64, max: f64, step: f64) -> Result<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(ChartError::InvalidConfiguration(format!("tick spacing {step} must be positive")));
    }
    let (lo, hi) = (min / step, max / step);
    let first = (lo - TICK_EPSILON * lo.abs().max(1.0)).ceil();
    let last = (hi + TICK_EPSILON * hi.abs().max(1.0)).floor();
    if last < first {
        return Ok(Vec::new());
    }
    let count = last - first + 1.0;
    if !count.is_finite() || count > MAX_TICKS as f64 {
        return Err(too_many_ticks(count));
    }
    Ok((0..count as u64)
        .map(|i| snap((first + i as f64) * step, step).clamp(min, max))
        .collect())
}

/// Decade ticks `power * spacing * k` for every power of ten spanning
/// `[min, max]`, ascending and deduplicated. Callers guarantee `min > 0`.
pub fn log_tick_values(min: f64, max: f64, spacing: f64) -> Result<Vec<f64>> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(ChartError::InvalidConfiguration(format!(
            "tick spacing {spacing} must be positive"
        )));
    }
    let low = min * (1.0 - TICK_EPSILON);
    let high = max * (1.0 + TICK_EPSILON);
    let mut values = Vec::new();
    for exp in (min.log10().floor() as i32)..=(max.log10().floor() as i32) {
        let power = 10f64.powi(exp);
        let step = power * spacing;
        let decade_end = power * 10.0 * (1.0 + TICK_EPSILON);
        let k_lo = (low / step).ceil().max(1.0);
        let k_hi = (decade_end.min(high) / step).floor();
        if k_hi < k_lo {
            continue;
        }
        let count = k_hi - k_lo + 1.0;
        if !count.is_finite() || values.len() as f64 + count > MAX_TICKS as f64 {
            return Err(too_many_ticks(values.len() as f64 + count));
        }
        let k_lo = k_lo as u64;
        values.extend((k_lo..=k_hi as u64).map(|k| snap(step * k as f64, step).clamp(min, max)));
    }
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| same_tick(*a, *b));
    Ok(values)
}

/// Round `value` to `SNAP_DIGITS` decimals below the magnitude of `step`,
/// removing drift such as `0.30000000000000004`.
fn snap(value: f64, step: f64) -> f64 {
    let digits = SNAP_DIGITS - step.log10().floor() as i32;
    if digits <= 0 {
        return value;
    }
    let scale = 10f64.powi(digits);
    let scaled = (value * scale).round();
    if !scaled.is_finite() || scaled.abs() >= 2f64.powi(53) {
        return value;
    }
    // avoid -0.0
    scaled / scale + 0.0
}

fn too_many_ticks(count: f64) -> ChartError {
    ChartError::InvalidConfiguration(format!("tick spacing yields {count} ticks (limit {MAX_TICKS})"))
}
