// File: crates/chart-core/src/table.rs
// Summary: DataTable, the mutable typed in-memory DataSource, and row comparators for sorting.

use std::cell::RefCell;
use std::cmp::Ordering;

use crate::error::{ChartError, Result};
use crate::source::{check_cell, DataSource, SourceCore};
use crate::types::{ColumnType, Number};

/// Orders two rows; used as one key of a multi-key sort.
pub trait RowComparator {
    fn compare(&self, a: &[Number], b: &[Number]) -> Ordering;

    /// Reject comparators that read columns the table does not have.
    fn validate(&self, _column_count: usize) -> Result<()> {
        Ok(())
    }
}

impl<F> RowComparator for F
where
    F: Fn(&[Number], &[Number]) -> Ordering,
{
    fn compare(&self, a: &[Number], b: &[Number]) -> Ordering {
        self(a, b)
    }
}

/// Ascending order on one column.
#[derive(Clone, Copy, Debug)]
pub struct Ascending(pub usize);

/// Descending order on one column.
#[derive(Clone, Copy, Debug)]
pub struct Descending(pub usize);

impl RowComparator for Ascending {
    fn compare(&self, a: &[Number], b: &[Number]) -> Ordering {
        a[self.0].total_cmp(&b[self.0])
    }

    fn validate(&self, column_count: usize) -> Result<()> {
        validate_sort_column(self.0, column_count)
    }
}

impl RowComparator for Descending {
    fn compare(&self, a: &[Number], b: &[Number]) -> Ordering {
        b[self.0].total_cmp(&a[self.0])
    }

    fn validate(&self, column_count: usize) -> Result<()> {
        validate_sort_column(self.0, column_count)
    }
}

fn validate_sort_column(col: usize, column_count: usize) -> Result<()> {
    if col >= column_count {
        return Err(ChartError::column(col, column_count));
    }
    Ok(())
}

/// Mutable table with a fixed, typed column layout.
///
/// Every mutation except [`DataTable::sort`] notifies the registered
/// listeners synchronously before returning. Methods take `&self` so a
/// table can be shared through `Rc` with the filters observing it.
pub struct DataTable {
    types: Vec<ColumnType>,
    rows: RefCell<Vec<Vec<Number>>>,
    core: SourceCore,
}

impl DataTable {
    pub fn new(types: impl Into<Vec<ColumnType>>) -> Self {
        Self { types: types.into(), rows: RefCell::new(Vec::new()), core: SourceCore::new() }
    }

    /// Declared kind of column `col`.
    pub fn column_type(&self, col: usize) -> Result<ColumnType> {
        self.types
            .get(col)
            .copied()
            .ok_or_else(|| ChartError::column(col, self.types.len()))
    }

    /// Append a row. The table is left untouched when the row does not fit.
    ///
    /// # Panics
    /// When called from inside one of this table's own change notifications.
    pub fn add<N: Into<Number>>(&self, values: impl IntoIterator<Item = N>) -> Result<()> {
        self.core.assert_idle();
        let row: Vec<Number> = values.into_iter().map(Into::into).collect();
        self.check_row(&row)?;
        self.rows.borrow_mut().push(row);
        self.core.notify_changed(self);
        Ok(())
    }

    /// Remove row `row` and return its cells.
    pub fn remove(&self, row: usize) -> Result<Vec<Number>> {
        self.core.assert_idle();
        let removed = {
            let mut rows = self.rows.borrow_mut();
            if row >= rows.len() {
                return Err(ChartError::row(row, rows.len()));
            }
            rows.remove(row)
        };
        self.core.notify_changed(self);
        Ok(removed)
    }

    /// Replace one cell and return the previous value. Listeners are only
    /// notified when the value actually changes.
    pub fn set(&self, col: usize, row: usize, value: impl Into<Number>) -> Result<Number> {
        self.core.assert_idle();
        let value = value.into();
        check_cell(col, row, self.types.len(), self.row_count())?;
        let expected = self.types[col];
        if !value.is_assignable_to(expected) {
            return Err(ChartError::TypeMismatch(format!(
                "column {col} expects {expected}, got {}",
                value.kind()
            )));
        }
        let old = std::mem::replace(&mut self.rows.borrow_mut()[row][col], value);
        if !old.same_value(&value) {
            self.core.notify_changed(self);
        }
        Ok(old)
    }

    /// Remove every row; listeners are notified once.
    pub fn clear(&self) {
        self.core.assert_idle();
        self.rows.borrow_mut().clear();
        self.core.notify_changed(self);
    }

    /// Stable multi-key sort. The first comparator decides; ties fall
    /// through to the next one in order.
    ///
    /// Reordering does not notify listeners. Derived sources built on this
    /// table keep their previous rows until refreshed explicitly.
    ///
    /// # Panics
    /// When called from inside one of this table's own change notifications.
    pub fn sort(&self, comparators: &[&dyn RowComparator]) -> Result<()> {
        self.core.assert_idle();
        for comparator in comparators {
            comparator.validate(self.types.len())?;
        }
        self.rows.borrow_mut().sort_by(|a, b| {
            comparators
                .iter()
                .map(|c| c.compare(a, b))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(())
    }

    fn check_row(&self, row: &[Number]) -> Result<()> {
        if row.len() != self.types.len() {
            return Err(ChartError::TypeMismatch(format!(
                "wrong number of columns: expected {}, got {}",
                self.types.len(),
                row.len()
            )));
        }
        for (col, (value, expected)) in row.iter().zip(&self.types).enumerate() {
            if !value.is_assignable_to(*expected) {
                return Err(ChartError::TypeMismatch(format!(
                    "column {col} expects {expected}, got {}",
                    value.kind()
                )));
            }
        }
        Ok(())
    }
}

impl DataSource for DataTable {
    fn column_count(&self) -> usize {
        self.types.len()
    }

    fn row_count(&self) -> usize {
        self.rows.borrow().len()
    }

    fn get(&self, col: usize, row: usize) -> Result<Number> {
        let rows = self.rows.borrow();
        check_cell(col, row, self.types.len(), rows.len())?;
        Ok(rows[row][col])
    }

    fn core(&self) -> &SourceCore {
        &self.core
    }
}
