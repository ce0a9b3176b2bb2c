//! CSV reading utilities.

mod header;
mod reader;

pub use header::{
    COUNTRY_COLUMN, MONTH_COLUMN, ObservationColumns, PRODUCT_COLUMN, VALUE_COLUMN, YEAR_COLUMN,
};
pub use reader::{frame_to_observations, read_csv_frame, read_observations, validate_encoding};
