// File: crates/chart-core/tests/scale.rs
// Purpose: Linear and logarithmic renderers: mapping, clamping, ticks and settings validation.

use chart_core::{
    Axis, AxisRenderer, ChartError, LinearRenderer, LogarithmicRenderer, RendererSettings, ScaleKind,
    ScaleTransform, TickKind,
};
use proptest::prelude::*;

fn settings(len: f64) -> RendererSettings {
    RendererSettings::new(len).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

#[test]
fn linear_maps_and_clamps() {
    let axis = Axis::new(0.0, 10.0).unwrap();
    let r = LinearRenderer::new(settings(100.0));
    assert_eq!(r.world_to_view(&axis, 5.0, false).unwrap(), 50.0);
    assert_eq!(r.world_to_view(&axis, -3.0, false).unwrap(), 0.0);
    assert_eq!(r.world_to_view(&axis, 12.0, false).unwrap(), 100.0);
    assert!(close(r.world_to_view(&axis, 12.0, true).unwrap(), 120.0));
    assert!(close(r.world_to_view(&axis, -1.0, true).unwrap(), -10.0));
    assert_eq!(r.view_to_world(&axis, 25.0, false).unwrap(), 2.5);
    assert_eq!(r.view_to_world(&axis, 150.0, false).unwrap(), 10.0);
    assert!(close(r.view_to_world(&axis, 150.0, true).unwrap(), 15.0));
}

#[test]
fn degenerate_axis_maps_to_origin() {
    let axis = Axis::new(4.0, 4.0).unwrap();
    let r = LinearRenderer::new(settings(100.0));
    assert_eq!(r.world_to_view(&axis, 4.0, false).unwrap(), 0.0);
    assert_eq!(r.world_to_view(&axis, 9.0, true).unwrap(), 0.0);
    assert_eq!(r.view_to_world(&axis, 60.0, true).unwrap(), 4.0);
    let ticks = r.ticks(&axis).unwrap();
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].value, 4.0);
    assert_eq!(ticks[0].position, 0.0);
}

#[test]
fn logarithmic_maps_decades_evenly() {
    let axis = Axis::new(1.0, 100.0).unwrap();
    let r = LogarithmicRenderer::new(settings(100.0));
    assert_eq!(r.world_to_view(&axis, 10.0, false).unwrap(), 50.0);
    assert_eq!(r.world_to_view(&axis, 1.0, false).unwrap(), 0.0);
    assert_eq!(r.world_to_view(&axis, 0.5, false).unwrap(), 0.0);
    assert_eq!(r.world_to_view(&axis, 1000.0, false).unwrap(), 100.0);
    assert!(close(r.world_to_view(&axis, 1000.0, true).unwrap(), 150.0));
    assert_eq!(r.world_to_view(&axis, 0.0, true).unwrap(), f64::NEG_INFINITY);
    assert!(close(r.view_to_world(&axis, 50.0, false).unwrap(), 10.0));
    assert_eq!(r.view_to_world(&axis, -5.0, false).unwrap(), 1.0);
}

#[test]
fn logarithmic_rejects_non_positive_bounds() {
    let axis = Axis::new(0.0, 100.0).unwrap();
    let r = LogarithmicRenderer::new(settings(100.0));
    assert!(matches!(r.world_to_view(&axis, 10.0, false), Err(ChartError::InvalidAxisRange { .. })));
    assert!(matches!(r.view_to_world(&axis, 10.0, false), Err(ChartError::InvalidAxisRange { .. })));
    assert!(matches!(r.ticks(&axis), Err(ChartError::InvalidAxisRange { .. })));

    let negative = Axis::new(-10.0, -1.0).unwrap();
    assert!(r.world_to_view(&negative, -5.0, true).is_err());
}

#[test]
fn linear_ticks_follow_spacing() {
    let axis = Axis::new(0.0, 10.0).unwrap();
    let r = LinearRenderer::new(settings(100.0).with_tick_spacing(2.5).unwrap());
    let ticks = r.ticks(&axis).unwrap();
    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    let positions: Vec<f64> = ticks.iter().map(|t| t.position).collect();
    assert_eq!(values, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    assert_eq!(positions, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    assert!(ticks.iter().all(|t| t.kind == TickKind::Standard));
}

#[test]
fn linear_ticks_without_spacing_pick_a_nice_step() {
    let axis = Axis::new(0.0, 10.0).unwrap();
    let ticks = LinearRenderer::new(settings(100.0)).ticks(&axis).unwrap();
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[3].value, 3.0);

    let offset = Axis::new(0.3, 1.7).unwrap();
    let ticks = LinearRenderer::new(settings(1.0)).ticks(&offset).unwrap();
    assert!(ticks.iter().all(|t| offset.contains(t.value)));
    assert!(ticks.windows(2).all(|w| w[0].value < w[1].value));
    assert!(close(ticks[0].value, 0.4));
}

#[test]
fn custom_ticks_merge_with_computed_ones() {
    let axis = Axis::new(0.0, 10.0).unwrap();
    let cfg = settings(100.0)
        .with_tick_spacing(2.5)
        .unwrap()
        .with_custom_ticks([5.0, 42.0, 1.0, 1.0, f64::NAN]);
    let ticks = LinearRenderer::new(cfg).ticks(&axis).unwrap();
    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 1.0, 2.5, 5.0, 7.5, 10.0]);
    assert_eq!(ticks[1].kind, TickKind::Custom);
    assert!(close(ticks[1].position, 10.0));
    assert_eq!(ticks[3].kind, TickKind::Custom);
    assert_eq!(ticks[2].kind, TickKind::Standard);
}

#[test]
fn logarithmic_ticks_fill_each_decade() {
    let axis = Axis::new(1.0, 100.0).unwrap();
    let ticks = LogarithmicRenderer::new(settings(100.0)).ticks(&axis).unwrap();
    assert_eq!(ticks.len(), 19);
    assert_eq!(ticks[0].position, 0.0);
    assert!(close(ticks[9].value, 10.0));
    assert!(close(ticks[9].position, 50.0));
    assert!(close(ticks[18].position, 100.0));

    let cfg = settings(100.0).with_custom_ticks([10.0, 15.0]);
    let ticks = LogarithmicRenderer::new(cfg).ticks(&axis).unwrap();
    assert_eq!(ticks.len(), 20);
    let ten = ticks.iter().find(|t| close(t.value, 10.0)).unwrap();
    assert_eq!(ten.kind, TickKind::Custom);
    assert_eq!(ticks.iter().filter(|t| t.kind == TickKind::Custom).count(), 2);
}

#[test]
fn axis_renderer_dispatches_on_kind() {
    let axis = Axis::new(1.0, 100.0).unwrap();
    let linear = AxisRenderer::new(ScaleKind::Linear, settings(99.0));
    let log = AxisRenderer::new(ScaleKind::Log10, settings(100.0));
    assert_eq!(linear.kind(), ScaleKind::Linear);
    assert_eq!(log.kind(), ScaleKind::Log10);
    assert!(close(linear.world_to_view(&axis, 10.0, false).unwrap(), 9.0));
    assert_eq!(log.world_to_view(&axis, 10.0, false).unwrap(), 50.0);
    assert_eq!(linear.settings().shape_length(), 99.0);
    assert_eq!(log.ticks(&axis).unwrap().len(), 19);
}

#[test]
fn settings_and_axes_validate_inputs() {
    assert_eq!(RendererSettings::default().shape_length(), 1.0);
    assert!(RendererSettings::new(0.0).is_err());
    assert!(RendererSettings::new(f64::INFINITY).is_err());
    assert!(settings(1.0).with_tick_spacing(-1.0).is_err());
    assert!(settings(1.0).with_tick_spacing(f64::NAN).is_err());
    assert!(matches!(Axis::new(2.0, 1.0), Err(ChartError::InvalidAxisRange { .. })));
    assert!(matches!(Axis::new(f64::NAN, 1.0), Err(ChartError::InvalidAxisRange { .. })));

    let axis = Axis::new(0.0, 1.0).unwrap();
    let tiny = LinearRenderer::new(settings(1.0).with_tick_spacing(1e-9).unwrap());
    assert!(matches!(tiny.ticks(&axis), Err(ChartError::InvalidConfiguration(_))));
}

#[test]
fn tick_values_land_exactly_on_rounded_bounds() {
    let axis = Axis::new(0.0, 0.7).unwrap();
    let r = LinearRenderer::new(settings(70.0).with_tick_spacing(0.1).unwrap());
    let ticks = r.ticks(&axis).unwrap();
    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
    assert_eq!(ticks[7].position, 70.0);
}

#[test]
fn tiny_logarithmic_spacing_is_refused_quickly() {
    let axis = Axis::new(9.0, 10.0).unwrap();
    let r = LogarithmicRenderer::new(settings(100.0).with_tick_spacing(1e-10).unwrap());
    assert!(matches!(r.ticks(&axis), Err(ChartError::InvalidConfiguration(_))));

    let fine = LogarithmicRenderer::new(settings(100.0).with_tick_spacing(0.01).unwrap());
    let ticks = fine.ticks(&axis).unwrap();
    assert_eq!(ticks.len(), 101);
    assert_eq!(ticks[50].value, 9.5);
}

proptest! {
    #[test]
    fn linear_round_trips(min in -1e3f64..1e3, span in 1e-3f64..1e3, t in -0.5f64..1.5, len in 1.0f64..4096.0) {
        let axis = Axis::new(min, min + span).unwrap();
        let r = LinearRenderer::new(settings(len));
        let value = min + t * span;
        let back = r.view_to_world(&axis, r.world_to_view(&axis, value, true).unwrap(), true).unwrap();
        prop_assert!((back - value).abs() <= 1e-9 * (1.0 + value.abs() + min.abs()), "{} vs {}", back, value);
    }

    #[test]
    fn logarithmic_round_trips(min in 1e-3f64..1e3, ratio in 1.5f64..1e6, t in 0.0f64..1.0, len in 1.0f64..4096.0) {
        let axis = Axis::new(min, min * ratio).unwrap();
        let r = LogarithmicRenderer::new(settings(len));
        let value = min * ratio.powf(t);
        let back = r.view_to_world(&axis, r.world_to_view(&axis, value, true).unwrap(), true).unwrap();
        prop_assert!((back - value).abs() <= 1e-9 * (1.0 + value.abs() + min.abs()), "{} vs {}", back, value);
    }

    #[test]
    fn linear_view_is_monotonic(a in -100.0f64..100.0, b in -100.0f64..100.0) {
        let axis = Axis::new(-50.0, 50.0).unwrap();
        let r = LinearRenderer::new(settings(10.0));
        let (va, vb) = (r.world_to_view(&axis, a, false).unwrap(), r.world_to_view(&axis, b, false).unwrap());
        prop_assert!((0.0..=10.0).contains(&va));
        if a <= b {
            prop_assert!(va <= vb);
        }
    }
}
