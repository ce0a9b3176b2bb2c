//! Output generation for seasonality results.
//!
//! - **Seasonality table**: every regularized month with its seasonal index (CSV)
//! - **Index table**: one row per (country, product, month) cell (CSV)
//! - **Quality report**: every data-quality issue of the run (JSON)

pub mod common;
pub mod csv;
pub mod frame;
pub mod report;
pub mod sink;

pub use common::{DEFAULT_OUTPUT_FILE, default_output_path, ensure_parent_dir};
pub use csv::{write_csv_frame, write_index_csv, write_seasonality_csv};
pub use frame::{INDEX_COLUMNS, SEASONALITY_COLUMNS, index_frame, seasonality_frame};
pub use report::write_report_json;
pub use sink::{CsvSink, MemorySink, SeasonalitySink};
