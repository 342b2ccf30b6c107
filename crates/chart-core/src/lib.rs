// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports observable data sources, smoothing filters and axis scales.

pub mod error;
pub mod types;
pub mod source;
pub mod statistics;
pub mod table;
pub mod series;
pub mod kernel;
pub mod filter;
pub mod convolution;
pub mod median;
pub mod axis;
pub mod grid;
pub mod scale;

pub use error::{ChartError, Result};
pub use types::{ColumnType, Number};
pub use source::{DataListener, DataSource, SourceCore};
pub use statistics::{Aggregate, Statistics};
pub use table::{Ascending, DataTable, Descending, RowComparator};
pub use series::DataSeries;
pub use kernel::Kernel;
pub use filter::{EdgeMode, Filter, WindowRule};
pub use convolution::Convolution;
pub use median::{Median, MedianWindow};
pub use axis::{Axis, ScaleKind};
pub use scale::{AxisRenderer, LinearRenderer, LogarithmicRenderer, RendererSettings, ScaleTransform, Tick, TickKind};
