pub mod pivot;
pub mod spec;
pub mod value;

pub use pivot::{MISSING_METRIC, PivotSeries, PivotTable, pivot};
pub use spec::{ChartSpec, ChartSpecBuilder, ChartType, EncodeMapping, LintFinding, LintSource};
pub use value::{DataRow, Value, row};
