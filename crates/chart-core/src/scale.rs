// File: crates/chart-core/src/scale.rs
// Summary: Linear and logarithmic axis renderers: world <-> view mapping and tick generation.

use crate::axis::{Axis, ScaleKind};
use crate::error::{ChartError, Result};
use crate::grid::{linear_tick_values, log_tick_values, nice_step, same_tick};
use crate::types::{AUTO_TICK_TARGET, DEFAULT_LOG_TICK_SPACING, DEFAULT_SHAPE_LENGTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    /// Generated from the tick spacing.
    Standard,
    /// Supplied through `RendererSettings::with_custom_ticks`.
    Custom,
}

/// A reference point on an axis: world value and its view position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
    pub kind: TickKind,
}

/// Renderer configuration shared by every scale kind.
/// Contract: `shape_length` is finite and positive; a tick spacing, when
/// set, is finite and positive.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererSettings {
    shape_length: f64,
    tick_spacing: Option<f64>,
    custom_ticks: Vec<f64>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self { shape_length: DEFAULT_SHAPE_LENGTH, tick_spacing: None, custom_ticks: Vec::new() }
    }
}

impl RendererSettings {
    /// Settings mapping onto `[0, shape_length]`.
    pub fn new(shape_length: f64) -> Result<Self> {
        Self::default().with_shape_length(shape_length)
    }

    pub fn with_shape_length(mut self, shape_length: f64) -> Result<Self> {
        if !shape_length.is_finite() || shape_length <= 0.0 {
            return Err(ChartError::InvalidConfiguration(format!(
                "shape length {shape_length} must be positive"
            )));
        }
        self.shape_length = shape_length;
        Ok(self)
    }

    /// Linear: distance between ticks. Logarithmic: step multiplier
    /// inside each decade (1.0 gives 1, 2, .., 10 times the power).
    pub fn with_tick_spacing(mut self, spacing: f64) -> Result<Self> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ChartError::InvalidConfiguration(format!(
                "tick spacing {spacing} must be positive"
            )));
        }
        self.tick_spacing = Some(spacing);
        Ok(self)
    }

    /// Extra tick values always emitted when inside the axis. Non-finite values are dropped.
    pub fn with_custom_ticks(mut self, ticks: impl IntoIterator<Item = f64>) -> Self {
        self.custom_ticks = ticks.into_iter().filter(|v| v.is_finite()).collect();
        self
    }

    pub fn shape_length(&self) -> f64 { self.shape_length }
    pub fn tick_spacing(&self) -> Option<f64> { self.tick_spacing }
    pub fn custom_ticks(&self) -> &[f64] { &self.custom_ticks }
}

/// Bidirectional mapping between an axis domain and `[0, shape_length]`.
pub trait ScaleTransform {
    fn settings(&self) -> &RendererSettings;

    /// View position of `value`. Without `extrapolate`, values at or beyond
    /// the bounds clamp to `0` / `shape_length`.
    fn world_to_view(&self, axis: &Axis, value: f64, extrapolate: bool) -> Result<f64>;

    /// Inverse of [`ScaleTransform::world_to_view`] for the same `extrapolate`.
    fn view_to_world(&self, axis: &Axis, position: f64, extrapolate: bool) -> Result<f64>;

    /// Ticks inside the axis, ascending by value.
    fn ticks(&self, axis: &Axis) -> Result<Vec<Tick>>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearRenderer {
    settings: RendererSettings,
}

impl LinearRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }
}

impl ScaleTransform for LinearRenderer {
    fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    fn world_to_view(&self, axis: &Axis, value: f64, extrapolate: bool) -> Result<f64> {
        let (min, max) = (axis.min(), axis.max());
        let len = self.settings.shape_length;
        if axis.is_degenerate() {
            return Ok(0.0);
        }
        if !extrapolate {
            if value <= min {
                return Ok(0.0);
            }
            if value >= max {
                return Ok(len);
            }
        }
        Ok((value - min) / (max - min) * len)
    }

    fn view_to_world(&self, axis: &Axis, position: f64, extrapolate: bool) -> Result<f64> {
        let (min, max) = (axis.min(), axis.max());
        let len = self.settings.shape_length;
        if axis.is_degenerate() {
            return Ok(min);
        }
        if !extrapolate {
            if position <= 0.0 {
                return Ok(min);
            }
            if position >= len {
                return Ok(max);
            }
        }
        Ok(min + position / len * (max - min))
    }

    fn ticks(&self, axis: &Axis) -> Result<Vec<Tick>> {
        let values = if axis.is_degenerate() {
            vec![axis.min()]
        } else {
            let step = match self.settings.tick_spacing {
                Some(step) => step,
                None => nice_step(axis.span(), AUTO_TICK_TARGET).unwrap_or(axis.span()),
            };
            linear_tick_values(axis.min(), axis.max(), step)
                .inspect_err(|e| log::warn!("linear ticks refused for {axis:?}: {e}"))?
        };
        build_ticks(self, axis, values)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogarithmicRenderer {
    settings: RendererSettings,
}

impl LogarithmicRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    /// `(log10 min, log10 max)`, or `InvalidAxisRange` for non-positive bounds.
    fn log_bounds(axis: &Axis) -> Result<(f64, f64)> {
        if axis.min() <= 0.0 || axis.max() <= 0.0 {
            return Err(ChartError::InvalidAxisRange {
                min: axis.min(),
                max: axis.max(),
                reason: "logarithmic scales need positive bounds",
            });
        }
        Ok((axis.min().log10(), axis.max().log10()))
    }
}

impl ScaleTransform for LogarithmicRenderer {
    fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// Extrapolated non-positive values map to negative infinity.
    fn world_to_view(&self, axis: &Axis, value: f64, extrapolate: bool) -> Result<f64> {
        let (min_log, max_log) = Self::log_bounds(axis)?;
        let len = self.settings.shape_length;
        if axis.is_degenerate() {
            return Ok(0.0);
        }
        if !extrapolate {
            if value <= axis.min() {
                return Ok(0.0);
            }
            if value >= axis.max() {
                return Ok(len);
            }
        }
        if value <= 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        Ok((value.log10() - min_log) / (max_log - min_log) * len)
    }

    fn view_to_world(&self, axis: &Axis, position: f64, extrapolate: bool) -> Result<f64> {
        let (min_log, max_log) = Self::log_bounds(axis)?;
        let len = self.settings.shape_length;
        if axis.is_degenerate() {
            return Ok(axis.min());
        }
        if !extrapolate {
            if position <= 0.0 {
                return Ok(axis.min());
            }
            if position >= len {
                return Ok(axis.max());
            }
        }
        Ok(10f64.powf(min_log + position / len * (max_log - min_log)))
    }

    fn ticks(&self, axis: &Axis) -> Result<Vec<Tick>> {
        Self::log_bounds(axis)?;
        let spacing = self.settings.tick_spacing.unwrap_or(DEFAULT_LOG_TICK_SPACING);
        let values = log_tick_values(axis.min(), axis.max(), spacing)
            .inspect_err(|e| log::warn!("log ticks refused for {axis:?}: {e}"))?;
        build_ticks(self, axis, values)
    }
}

/// Renderer chosen by scale kind.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisRenderer {
    Linear(LinearRenderer),
    Logarithmic(LogarithmicRenderer),
}

impl AxisRenderer {
    pub fn new(kind: ScaleKind, settings: RendererSettings) -> Self {
        match kind {
            ScaleKind::Linear => AxisRenderer::Linear(LinearRenderer::new(settings)),
            ScaleKind::Log10 => AxisRenderer::Logarithmic(LogarithmicRenderer::new(settings)),
        }
    }

    pub fn kind(&self) -> ScaleKind {
        match self {
            AxisRenderer::Linear(_) => ScaleKind::Linear,
            AxisRenderer::Logarithmic(_) => ScaleKind::Log10,
        }
    }

    fn inner(&self) -> &dyn ScaleTransform {
        match self {
            AxisRenderer::Linear(r) => r,
            AxisRenderer::Logarithmic(r) => r,
        }
    }
}

impl ScaleTransform for AxisRenderer {
    fn settings(&self) -> &RendererSettings {
        self.inner().settings()
    }

    fn world_to_view(&self, axis: &Axis, value: f64, extrapolate: bool) -> Result<f64> {
        self.inner().world_to_view(axis, value, extrapolate)
    }

    fn view_to_world(&self, axis: &Axis, position: f64, extrapolate: bool) -> Result<f64> {
        self.inner().view_to_world(axis, position, extrapolate)
    }

    fn ticks(&self, axis: &Axis) -> Result<Vec<Tick>> {
        self.inner().ticks(axis)
    }
}

/// Custom ticks inside the axis first, then computed values not already
/// covered by a custom tick; sorted by value.
fn build_ticks<T: ScaleTransform + ?Sized>(renderer: &T, axis: &Axis, computed: Vec<f64>) -> Result<Vec<Tick>> {
    let mut custom: Vec<f64> = Vec::new();
    for &v in renderer.settings().custom_ticks() {
        if axis.contains(v) && !custom.iter().any(|&c| same_tick(c, v)) {
            custom.push(v);
        }
    }
    let mut ticks = Vec::with_capacity(custom.len() + computed.len());
    for v in custom.iter().copied() {
        ticks.push(Tick { value: v, position: renderer.world_to_view(axis, v, false)?, kind: TickKind::Custom });
    }
    for v in computed {
        if custom.iter().any(|&c| same_tick(c, v)) {
            continue;
        }
        ticks.push(Tick { value: v, position: renderer.world_to_view(axis, v, false)?, kind: TickKind::Standard });
    }
    ticks.sort_by(|a, b| a.value.total_cmp(&b.value));
    Ok(ticks)
}
