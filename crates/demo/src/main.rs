// File: crates/demo/src/main.rs
// Summary: Demo loads an XY CSV (or synthesizes a noisy sine), smooths it with the core filters,
//          prints statistics and axis ticks, and writes the filtered columns to target/out.

use anyhow::{Context, Result};
use chart_core::{
    Axis, AxisRenderer, ColumnType, Convolution, DataSeries, DataSource, DataTable, EdgeMode, Filter,
    Kernel, Median, MedianWindow, RendererSettings, ScaleKind, ScaleTransform, WindowRule,
};
use std::path::{Path, PathBuf};
use std::rc::Rc;

const KERNEL_VARIANCE: f64 = 10.0;
const SAMPLE_COUNT: usize = 200;

fn main() -> Result<()> {
    env_logger::init();

    let table = Rc::new(DataTable::new([ColumnType::Real, ColumnType::Real]));
    let input = std::env::args().nth(1).map(PathBuf::from);
    match &input {
        Some(path) => {
            let n = load_xy_csv(path, &table)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            println!("Loaded {n} rows from {}", path.display());
        }
        None => {
            synthesize(&table, SAMPLE_COUNT)?;
            println!("No input given; synthesized {SAMPLE_COUNT} noisy sine samples");
        }
    }
    if table.row_count() == 0 {
        anyhow::bail!("no rows loaded; expected two numeric columns (x, y)");
    }

    let lowpass_kernel = Kernel::binomial_for_variance(KERNEL_VARIANCE)?.normalize()?;
    let highpass_kernel = lowpass_kernel.negate().add(&Kernel::identity());
    let window = (2.0 * KERNEL_VARIANCE).round() as usize;

    let lowpass = Convolution::new(table.clone(), lowpass_kernel, EdgeMode::Repeat, [1])?;
    let highpass = Convolution::new(table.clone(), highpass_kernel, EdgeMode::Repeat, [1])?;
    let average = Convolution::new(
        table.clone(),
        Kernel::uniform(window, window - 1, 1.0)?.normalize()?,
        EdgeMode::Omit,
        [1],
    )?;
    let median = Median::new(table.clone(), MedianWindow::new(window, window - 1)?, EdgeMode::Omit, [1])?;

    let series = [
        DataSeries::new("Data", table.clone(), [0, 1])?,
        DataSeries::new("Lowpass", lowpass.clone(), [0, 1])?,
        DataSeries::new("Highpass", highpass.clone(), [0, 1])?,
        DataSeries::new("Moving Average", average.clone(), [0, 1])?,
        DataSeries::new("Moving Median", median.clone(), [0, 1])?,
    ];

    for s in &series {
        let stats = s.statistics();
        let y = stats.column(1)?;
        println!(
            "{:<15} rows={:<4} y: min={:>9.4} max={:>9.4} mean={:>9.4} sd={:>8.4}",
            s.name(),
            s.row_count(),
            y.min,
            y.max,
            y.mean,
            y.std_dev()
        );
    }

    print_ticks(&table)?;

    let out = out_name_with(input.as_deref(), "filtered");
    write_filtered_csv(&out, &table, &lowpass, &highpass, &average, &median)?;
    println!("Wrote {}", out.display());

    Ok(())
}

/// Append every parseable (x, y) record of `path` to `table`; returns the row count added.
fn load_xy_csv(path: &Path, table: &DataTable) -> Result<usize> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    log::info!("headers: {headers:?}");
    let idx = |names: &[&str], fallback: usize| -> usize {
        headers.iter().position(|h| names.contains(&h.as_str())).unwrap_or(fallback)
    };
    let i_x = idx(&["x", "time", "t", "index"], 0);
    let i_y = idx(&["y", "value", "close", "c"], 1);

    let mut added = 0;
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parse = |i: usize| rec.get(i).and_then(|s| s.parse::<f64>().ok());
        match (parse(i_x), parse(i_y)) {
            (Some(x), Some(y)) => {
                table.add([x, y])?;
                added += 1;
            }
            _ => log::warn!("skipping record {}: not numeric in columns {i_x}/{i_y}", line + 1),
        }
    }
    Ok(added)
}

/// Sine wave with deterministic, skewed noise.
fn synthesize(table: &DataTable, n: usize) -> Result<()> {
    for i in 0..n {
        let x = i as f64 / 2.0 / std::f64::consts::PI;
        let jitter = ((i * 7919) % 113) as f64 / 113.0 - 0.5;
        let error = (3.0f64 * 0.1).sqrt() * 3.0 * jitter;
        table.add([x, 10.0 * (x / 5.0).sin() + error * error * error])?;
    }
    Ok(())
}

fn print_ticks(table: &DataTable) -> Result<()> {
    let x_axis = Axis::from_column(table, 0)?;
    let linear = AxisRenderer::new(ScaleKind::Linear, RendererSettings::new(800.0)?);
    let ticks = linear.ticks(&x_axis)?;
    println!("x axis [{:.3}, {:.3}], {} linear ticks:", x_axis.min(), x_axis.max(), ticks.len());
    for t in &ticks {
        println!("  {:>10.4} @ {:>7.2}", t.value, t.position);
    }

    let y_stats = table.statistics();
    let y = y_stats.column(1)?;
    let spread = Axis::new(1.0, 1.0 + (y.max - y.min).abs())?;
    let log = AxisRenderer::new(ScaleKind::Log10, RendererSettings::new(800.0)?.with_custom_ticks([1.5]));
    match log.ticks(&spread) {
        Ok(ticks) => {
            let labels = ticks.iter().map(|t| format!("{:.3}", t.value)).collect::<Vec<_>>();
            println!("y spread [{:.3}, {:.3}] log ticks: {}", spread.min(), spread.max(), labels.join(", "));
        }
        Err(err) => log::warn!("log ticks unavailable: {err}"),
    }
    Ok(())
}

/// Filtered value of `filter` aligned with source row `row`, if that row survived edge handling.
fn aligned<R: WindowRule>(filter: &Filter<R>, row: usize) -> Option<f64> {
    let lead = filter.source_row(0);
    let out = row.checked_sub(lead)?;
    filter.get_f64(1, out).ok()
}

fn write_filtered_csv(
    out: &Path,
    table: &DataTable,
    lowpass: &Convolution,
    highpass: &Convolution,
    average: &Convolution,
    median: &Median,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("creating {}", out.display()))?;
    wtr.write_record(["x", "y", "lowpass", "highpass", "moving_average", "moving_median"])?;
    let cell = |v: Option<f64>| v.map(|v| format!("{v:.6}")).unwrap_or_default();
    for row in 0..table.row_count() {
        wtr.write_record([
            format!("{:.6}", table.get_f64(0, row)?),
            format!("{:.6}", table.get_f64(1, row)?),
            cell(aligned(lowpass, row)),
            cell(aligned(highpass, row)),
            cell(aligned(average, row)),
            cell(aligned(median, row)),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Produce output file name like target/out/<stem>_<suffix>.csv
fn out_name_with(input: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = input
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("synthetic");
    let mut out = PathBuf::from("target/out");
    if let Err(err) = std::fs::create_dir_all(&out) {
        log::warn!("cannot create {}: {err}", out.display());
    }
    out.push(format!("{stem}_{suffix}.csv"));
    out
}
