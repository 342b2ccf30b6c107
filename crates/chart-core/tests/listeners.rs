// File: crates/chart-core/tests/listeners.rs
// Purpose: Listener registry semantics and DataSeries column views.

use std::cell::Cell;
use std::rc::Rc;

use chart_core::{
    source, ChartError, ColumnType, DataListener, DataSeries, DataSource, DataTable, Number,
};

#[derive(Default)]
struct Counter {
    hits: Cell<usize>,
    last_rows: Cell<usize>,
}

impl DataListener for Counter {
    fn data_changed(&self, source: &dyn DataSource) {
        self.hits.set(self.hits.get() + 1);
        self.last_rows.set(source.row_count());
    }
}

fn subscribe(source: &dyn DataSource) -> (Rc<Counter>, Rc<dyn DataListener>) {
    let counter = Rc::new(Counter::default());
    let handle: Rc<dyn DataListener> = counter.clone();
    source.add_listener(&handle);
    (counter, handle)
}

fn table() -> Rc<DataTable> {
    let table = Rc::new(DataTable::new([ColumnType::Integer, ColumnType::Real, ColumnType::Real]));
    for i in 0..3i64 {
        table.add([Number::Integer(i), Number::Real(i as f64 * 10.0), Number::Real(-(i as f64))]).unwrap();
    }
    table
}

#[test]
fn duplicate_registration_notifies_once() {
    let table = table();
    let (counter, handle) = subscribe(&*table);
    table.add_listener(&handle);
    assert_eq!(table.core().listener_count(), 1);

    table.clear();
    assert_eq!(counter.hits.get(), 1);
    assert_eq!(counter.last_rows.get(), 0);

    assert!(table.remove_listener(&handle));
    assert!(!table.remove_listener(&handle));
    table.add([Number::Integer(9), Number::Real(0.0), Number::Real(0.0)]).unwrap();
    assert_eq!(counter.hits.get(), 1);
}

#[test]
fn dropped_listeners_are_pruned() {
    let table = table();
    let (first, first_handle) = subscribe(&*table);
    let (second, second_handle) = subscribe(&*table);
    assert_eq!(table.core().listener_count(), 2);

    drop(second_handle);
    drop(second);
    assert_eq!(table.core().listener_count(), 1);

    table.remove(0).unwrap();
    assert_eq!(first.hits.get(), 1);
    drop(first_handle);
}

struct Meddler {
    target: Rc<DataTable>,
}

impl DataListener for Meddler {
    fn data_changed(&self, _source: &dyn DataSource) {
        let _ = self.target.add([Number::Integer(0), Number::Real(0.0), Number::Real(0.0)]);
    }
}

#[test]
#[should_panic(expected = "mutated from inside its own change notification")]
fn mutating_the_notifying_source_panics() {
    let table = table();
    let meddler: Rc<dyn DataListener> = Rc::new(Meddler { target: table.clone() });
    table.add_listener(&meddler);
    table.clear();
}

#[test]
fn listeners_may_mutate_other_sources() {
    let observed = table();
    let other = table();
    let meddler: Rc<dyn DataListener> = Rc::new(Meddler { target: other.clone() });
    observed.add_listener(&meddler);
    observed.clear();
    assert_eq!(other.row_count(), 4);
}

#[test]
fn series_maps_columns_in_order() {
    let table = table();
    let series = DataSeries::new("y vs x", table.clone(), [2, 0]).unwrap();
    assert_eq!(series.name(), "y vs x");
    assert_eq!(series.columns(), &[2, 0]);
    assert_eq!(series.column_count(), 2);
    assert_eq!(series.row_count(), 3);
    assert_eq!(series.get(0, 2).unwrap(), Number::Real(-2.0));
    assert_eq!(series.get(1, 2).unwrap(), Number::Integer(2));
    assert!(matches!(series.get(2, 0), Err(ChartError::IndexOutOfRange { .. })));
    assert!(matches!(series.get(0, 3), Err(ChartError::IndexOutOfRange { .. })));

    let collected: Vec<Vec<Number>> = source::rows(&*series).collect();
    assert_eq!(collected[1], vec![Number::Real(-1.0), Number::Integer(1)]);
}

#[test]
fn series_forwards_changes_and_refreshes_statistics() {
    let table = table();
    let series = DataSeries::new("y", table.clone(), [1]).unwrap();
    let (counter, _handle) = subscribe(&*series);
    assert_eq!(series.statistics().column(0).unwrap().max, 20.0);

    table.set(1, 2, 50.0).unwrap();
    assert_eq!(counter.hits.get(), 1);
    assert_eq!(series.statistics().column(0).unwrap().max, 50.0);

    table.set(1, 2, 50.0).unwrap();
    assert_eq!(counter.hits.get(), 1);
}

#[test]
fn series_defaults_to_every_column_and_validates() {
    let table = table();
    let all = DataSeries::new("all", table.clone(), Vec::new()).unwrap();
    assert_eq!(all.columns(), &[0, 1, 2]);
    assert_eq!(all.row(1).unwrap(), table.row(1).unwrap());

    let bad = DataSeries::new("bad", table.clone(), [3]);
    assert!(matches!(bad, Err(ChartError::InvalidConfiguration(_))));
    assert_eq!(table.core().listener_count(), 1);
    drop(all);
    assert_eq!(table.core().listener_count(), 0);
}
