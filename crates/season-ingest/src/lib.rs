//! Observation ingestion.
//!
//! This crate reads the monthly demand table into raw observation rows:
//!
//! - **CSV Loading**: Read a CSV file with every column as text via Polars
//! - **Column Resolution**: Locate `Country`, `Product`, `Year`, `Month`, `Value` case-insensitively
//! - **Cell Coercion**: Parse year/month integers, keep value cells raw for the cleaning stage
//!
//! # Example
//!
//! ```ignore
//! use season_ingest::{CsvObservationSource, ObservationSource};
//!
//! let source = CsvObservationSource::new("data/demand.csv");
//! let rows = source.read_observations()?;
//! ```

mod cells;
mod csv;
mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    COUNTRY_COLUMN, MONTH_COLUMN, ObservationColumns, PRODUCT_COLUMN, VALUE_COLUMN, YEAR_COLUMN,
    frame_to_observations, read_csv_frame, read_observations, validate_encoding,
};

// === Cell Helpers ===
pub use cells::{normalize_label, parse_f64, parse_i64};

// === Sources ===
pub use source::{CsvObservationSource, ObservationSource};
