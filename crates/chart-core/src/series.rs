// File: crates/chart-core/src/series.rs
// Summary: DataSeries, a named column-subset view over another DataSource.
// Notes:
// - Typical use is picking the x and y columns out of a table or a filter
//   before handing them to a plot. Notifications from the underlying source
//   are forwarded unchanged.

use std::rc::Rc;

use crate::error::{ChartError, Result};
use crate::source::{DataListener, DataSource, SourceCore};
use crate::types::Number;

pub struct DataSeries {
    name: String,
    source: Rc<dyn DataSource>,
    columns: Vec<usize>,
    core: SourceCore,
}

impl DataSeries {
    /// View `columns` of `source` (in the given order) as a new source.
    /// An empty column list selects every column.
    pub fn new(
        name: impl Into<String>,
        source: Rc<dyn DataSource>,
        columns: impl Into<Vec<usize>>,
    ) -> Result<Rc<Self>> {
        let mut columns = columns.into();
        let available = source.column_count();
        if columns.is_empty() {
            columns = (0..available).collect();
        }
        if let Some(&bad) = columns.iter().find(|&&c| c >= available) {
            return Err(ChartError::InvalidConfiguration(format!(
                "series column {bad} outside source with {available} columns"
            )));
        }
        let series = Rc::new(Self {
            name: name.into(),
            source: Rc::clone(&source),
            columns,
            core: SourceCore::new(),
        });
        let listener: Rc<dyn DataListener> = series.clone();
        source.add_listener(&listener);
        Ok(series)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &Rc<dyn DataSource> {
        &self.source
    }

    /// Source column behind each series column.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }
}

impl DataSource for DataSeries {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn row_count(&self) -> usize {
        self.source.row_count()
    }

    fn get(&self, col: usize, row: usize) -> Result<Number> {
        let &mapped = self
            .columns
            .get(col)
            .ok_or_else(|| ChartError::column(col, self.columns.len()))?;
        self.source.get(mapped, row)
    }

    fn core(&self) -> &SourceCore {
        &self.core
    }
}

impl DataListener for DataSeries {
    fn data_changed(&self, _source: &dyn DataSource) {
        self.core.notify_changed(self);
    }
}
