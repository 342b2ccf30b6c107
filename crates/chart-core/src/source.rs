// File: crates/chart-core/src/source.rs
// Summary: DataSource contract, weak listener registry and row iteration.
// Notes:
// - Everything here is single-threaded (`Rc`/`RefCell`). A host that shares
//   sources across threads has to wrap each source in its own lock.
// - Mutating a source from inside its own change notification is forbidden
//   and panics; see `Listeners::notify`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::{ChartError, Result};
use crate::statistics::Statistics;
use crate::types::Number;

/// Receives a call whenever an observed source changes visible cells or its row count.
pub trait DataListener {
    fn data_changed(&self, source: &dyn DataSource);
}

/// Read/observe contract for tabular numeric data.
///
/// `column_count` never changes after construction; `row_count` may.
pub trait DataSource {
    fn column_count(&self) -> usize;
    fn row_count(&self) -> usize;
    /// Cell at zero-based `(col, row)`.
    fn get(&self, col: usize, row: usize) -> Result<Number>;
    /// Listener registry and statistics cache owned by this source.
    fn core(&self) -> &SourceCore;

    /// Cell widened to `f64`.
    fn get_f64(&self, col: usize, row: usize) -> Result<f64> {
        Ok(self.get(col, row)?.as_f64())
    }

    /// All cells of one row, in column order.
    fn row(&self, row: usize) -> Result<Vec<Number>> {
        (0..self.column_count()).map(|col| self.get(col, row)).collect()
    }

    /// Register `listener`. The source keeps only a weak handle, so the
    /// caller decides how long the listener lives. Registering twice is a no-op.
    fn add_listener(&self, listener: &Rc<dyn DataListener>) {
        self.core().listeners.add(listener);
    }

    /// Unregister `listener`; returns whether it was registered.
    fn remove_listener(&self, listener: &Rc<dyn DataListener>) -> bool {
        self.core().listeners.remove(listener)
    }

    /// Aggregates over the current contents, recomputed after any change.
    fn statistics(&self) -> Rc<Statistics> {
        self.core().statistics(self)
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows::new(self)
    }
}

/// Iterate the rows of any source, including trait objects.
pub fn rows<S: DataSource + ?Sized>(source: &S) -> Rows<'_, S> {
    Rows::new(source)
}

/// Iterator over the rows of a source, yielding owned cell vectors.
pub struct Rows<'a, S: ?Sized> {
    source: &'a S,
    next: usize,
}

impl<'a, S: DataSource + ?Sized> Rows<'a, S> {
    fn new(source: &'a S) -> Self {
        Self { source, next: 0 }
    }
}

impl<S: DataSource + ?Sized> Iterator for Rows<'_, S> {
    type Item = Vec<Number>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.source.row_count() {
            return None;
        }
        let row = self.source.row(self.next).ok();
        self.next += 1;
        row
    }
}

/// State every source carries: its listeners and its lazily built statistics.
#[derive(Default)]
pub struct SourceCore {
    listeners: Listeners,
    statistics: RefCell<Option<Rc<Statistics>>>,
}

impl SourceCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cached statistics and fan the change out to every live listener.
    pub fn notify_changed(&self, source: &dyn DataSource) {
        self.statistics.borrow_mut().take();
        self.listeners.notify(source);
    }

    /// # Panics
    /// If the owning source is in the middle of notifying its listeners.
    pub fn assert_idle(&self) {
        assert!(
            !self.listeners.firing.get(),
            "data source mutated from inside its own change notification"
        );
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn statistics<S: DataSource + ?Sized>(&self, source: &S) -> Rc<Statistics> {
        if let Some(cached) = self.statistics.borrow().as_ref() {
            return Rc::clone(cached);
        }
        let fresh = Rc::new(Statistics::compute(source));
        *self.statistics.borrow_mut() = Some(Rc::clone(&fresh));
        fresh
    }
}

#[derive(Default)]
struct Listeners {
    entries: RefCell<Vec<Weak<dyn DataListener>>>,
    firing: Cell<bool>,
}

impl Listeners {
    fn add(&self, listener: &Rc<dyn DataListener>) {
        let handle = Rc::downgrade(listener);
        let mut entries = self.entries.borrow_mut();
        entries.retain(|w| w.strong_count() > 0);
        if !entries.iter().any(|w| Weak::ptr_eq(w, &handle)) {
            entries.push(handle);
        }
    }

    fn remove(&self, listener: &Rc<dyn DataListener>) -> bool {
        let handle = Rc::downgrade(listener);
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|w| !Weak::ptr_eq(w, &handle));
        entries.len() != before
    }

    fn len(&self) -> usize {
        self.entries.borrow().iter().filter(|w| w.strong_count() > 0).count()
    }

    /// Synchronous fan-out. Listeners are snapshotted first so they may
    /// register or unregister others; those changes apply to the next call.
    ///
    /// # Panics
    /// If called again while a fan-out of the same source is in progress.
    fn notify(&self, source: &dyn DataSource) {
        assert!(
            !self.firing.get(),
            "re-entrant change notification: a listener mutated the source it observes"
        );
        let live: Vec<Rc<dyn DataListener>> = {
            let mut entries = self.entries.borrow_mut();
            entries.retain(|w| w.strong_count() > 0);
            entries.iter().filter_map(Weak::upgrade).collect()
        };
        log::trace!("notifying {} listener(s)", live.len());
        let _firing = FiringGuard::enter(&self.firing);
        for listener in live {
            listener.data_changed(source);
        }
    }
}

struct FiringGuard<'a>(&'a Cell<bool>);

impl<'a> FiringGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for FiringGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Bounds check shared by every source implementation.
pub(crate) fn check_cell(col: usize, row: usize, columns: usize, rows: usize) -> Result<()> {
    if col >= columns {
        return Err(ChartError::column(col, columns));
    }
    if row >= rows {
        return Err(ChartError::row(row, rows));
    }
    Ok(())
}
