// File: crates/chart-core/src/filter.rs
// Summary: Sliding-window filters as derived, self-refreshing DataSources with edge-mode policies.
// Notes:
// - A filter keeps an `Rc` to its source and registers itself as a (weak)
//   listener, so the source outlives the filter and never keeps it alive.
// - Rows are recomputed eagerly on every source notification, then the
//   filter notifies its own listeners. Chains of filters refresh in order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ChartError, Result};
use crate::source::{check_cell, DataListener, DataSource, SourceCore};
use crate::types::Number;

/// How reads beyond the first or last source row are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Drop output rows whose window would leave the source.
    Omit,
    /// Clamp to the nearest boundary row.
    #[default]
    Repeat,
    /// Read 0.0 outside the source (convolution only).
    Zero,
    /// Reflect about the boundary rows (`-1 -> 1`, `n -> n - 2`).
    Mirror,
}

impl EdgeMode {
    /// Sample `values` at a possibly out-of-range index.
    pub fn sample(self, values: &[f64], index: isize) -> f64 {
        let n = values.len() as isize;
        if (0..n).contains(&index) {
            return values[index as usize];
        }
        if n == 0 {
            return f64::NAN;
        }
        match self {
            EdgeMode::Zero => 0.0,
            EdgeMode::Omit | EdgeMode::Repeat => values[index.clamp(0, n - 1) as usize],
            EdgeMode::Mirror => {
                if n == 1 {
                    return values[0];
                }
                let period = 2 * (n - 1);
                let m = index.rem_euclid(period);
                values[(if m >= n { period - m } else { m }) as usize]
            }
        }
    }
}

/// The per-window reduction a filter applies (weighted sum, median, ...).
pub trait WindowRule {
    /// Short name used in log output.
    fn id(&self) -> &'static str;
    /// Number of samples in one window.
    fn span(&self) -> usize;
    /// Index inside the window aligned with the output sample.
    fn offset(&self) -> usize;
    fn supports(&self, _mode: EdgeMode) -> bool {
        true
    }
    /// Reduce one window (in source order) to a single value. `scratch`
    /// is a reusable buffer the rule may clobber.
    fn reduce(&self, window: &[f64], scratch: &mut Vec<f64>) -> f64;
}

/// Read-only DataSource derived from `source` by sliding a [`WindowRule`]
/// over selected columns. Unfiltered columns pass through from the
/// aligned source row.
pub struct Filter<R: WindowRule> {
    source: Rc<dyn DataSource>,
    rule: R,
    mode: EdgeMode,
    columns: Vec<usize>,
    rows: RefCell<Vec<Vec<Number>>>,
    core: SourceCore,
}

impl<R: WindowRule + 'static> Filter<R> {
    /// Build the filter, compute its rows and subscribe to `source`.
    pub fn new(
        source: Rc<dyn DataSource>,
        rule: R,
        mode: EdgeMode,
        columns: impl Into<Vec<usize>>,
    ) -> Result<Rc<Self>> {
        let mut columns = columns.into();
        validate(&*source, &rule, mode, &columns)?;
        columns.sort_unstable();
        columns.dedup();
        let filter = Rc::new(Self {
            source: Rc::clone(&source),
            rule,
            mode,
            columns,
            rows: RefCell::new(Vec::new()),
            core: SourceCore::new(),
        });
        filter.recompute()?;
        let listener: Rc<dyn DataListener> = filter.clone();
        source.add_listener(&listener);
        Ok(filter)
    }
}

impl<R: WindowRule> Filter<R> {
    pub fn source(&self) -> &Rc<dyn DataSource> {
        &self.source
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn mode(&self) -> EdgeMode {
        self.mode
    }

    /// Source columns this filter transforms.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Source row aligned with output row `row`.
    pub fn source_row(&self, row: usize) -> usize {
        row + self.lead()
    }

    /// Recompute from the source and notify listeners. Needed only after
    /// source changes that do not notify, such as sorting a table.
    ///
    /// # Panics
    /// When called from inside one of this filter's own notifications.
    pub fn refresh(&self) -> Result<()> {
        self.core.assert_idle();
        self.recompute()?;
        self.core.notify_changed(self);
        Ok(())
    }

    fn lead(&self) -> usize {
        match self.mode {
            EdgeMode::Omit => self.rule.offset(),
            _ => 0,
        }
    }

    fn recompute(&self) -> Result<()> {
        let src = &*self.source;
        let n = src.row_count();
        let span = self.rule.span();
        let offset = self.rule.offset() as isize;
        let lead = self.lead();
        let out_rows = match self.mode {
            EdgeMode::Omit => n.saturating_sub(span - 1),
            _ => n,
        };

        let mut derived = (0..out_rows)
            .map(|i| src.row(i + lead))
            .collect::<Result<Vec<_>>>()?;
        let mut window = Vec::with_capacity(span);
        let mut scratch = Vec::with_capacity(span);
        for &col in &self.columns {
            let values = (0..n).map(|r| src.get_f64(col, r)).collect::<Result<Vec<_>>>()?;
            for (i, row) in derived.iter_mut().enumerate() {
                let start = (i + lead) as isize - offset;
                window.clear();
                window.extend((0..span as isize).map(|k| self.mode.sample(&values, start + k)));
                row[col] = Number::Real(self.rule.reduce(&window, &mut scratch));
            }
        }
        log::debug!(
            "{} filter recomputed: {} source rows -> {} rows ({:?})",
            self.rule.id(),
            n,
            out_rows,
            self.mode
        );
        *self.rows.borrow_mut() = derived;
        Ok(())
    }
}

fn validate<R: WindowRule>(
    source: &dyn DataSource,
    rule: &R,
    mode: EdgeMode,
    columns: &[usize],
) -> Result<()> {
    if rule.span() == 0 {
        return Err(ChartError::InvalidConfiguration(format!("{} window is empty", rule.id())));
    }
    if rule.offset() >= rule.span() {
        return Err(ChartError::InvalidConfiguration(format!(
            "{} window offset {} outside span {}",
            rule.id(),
            rule.offset(),
            rule.span()
        )));
    }
    if !rule.supports(mode) {
        return Err(ChartError::InvalidConfiguration(format!(
            "{} filter does not support {mode:?} edges",
            rule.id()
        )));
    }
    if columns.is_empty() {
        return Err(ChartError::InvalidConfiguration("no columns selected for filtering".into()));
    }
    if let Some(&bad) = columns.iter().find(|&&c| c >= source.column_count()) {
        return Err(ChartError::InvalidConfiguration(format!(
            "column {bad} outside source with {} columns",
            source.column_count()
        )));
    }
    Ok(())
}

impl<R: WindowRule> DataSource for Filter<R> {
    fn column_count(&self) -> usize {
        self.source.column_count()
    }

    fn row_count(&self) -> usize {
        self.rows.borrow().len()
    }

    fn get(&self, col: usize, row: usize) -> Result<Number> {
        let rows = self.rows.borrow();
        check_cell(col, row, self.column_count(), rows.len())?;
        Ok(rows[row][col])
    }

    fn core(&self) -> &SourceCore {
        &self.core
    }
}

impl<R: WindowRule> DataListener for Filter<R> {
    fn data_changed(&self, _source: &dyn DataSource) {
        if let Err(err) = self.recompute() {
            log::error!("{} filter refresh failed: {err}", self.rule.id());
        }
        self.core.notify_changed(self);
    }
}
