//! Run parameters for the seasonality pipeline.

use serde::{Deserialize, Serialize};

/// Text marker the source uses for "no data"; treated as a zero value.
pub const DEFAULT_SENTINEL: &str = "NODATA";

/// Trailing window, in years, of seasonal ratios used for the index.
pub const DEFAULT_LOOKBACK_YEARS: i32 = 10;

/// Cells with fewer rows than this keep every row instead of being trimmed.
pub const DEFAULT_MIN_ROWS_FOR_TRIM: usize = 3;

/// Options controlling one pipeline run.
///
/// The current year is always supplied by the caller so that the retention
/// window never depends on the wall clock inside the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Year the retention window is measured from.
    pub current_year: i32,

    /// Ratios with `year >= current_year - lookback_years` are retained.
    pub lookback_years: i32,

    /// Value text treated as zero (and therefore dropped).
    pub sentinel: String,

    /// Minimum rows in a (country, product, month) cell before the highest
    /// and lowest ratios are trimmed.
    pub min_rows_for_trim: usize,
}

impl PipelineOptions {
    pub fn new(current_year: i32) -> Self {
        Self {
            current_year,
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            sentinel: DEFAULT_SENTINEL.to_string(),
            min_rows_for_trim: DEFAULT_MIN_ROWS_FOR_TRIM,
        }
    }

    #[must_use]
    pub fn with_lookback_years(mut self, years: i32) -> Self {
        self.lookback_years = years;
        self
    }

    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    #[must_use]
    pub fn with_min_rows_for_trim(mut self, rows: usize) -> Self {
        self.min_rows_for_trim = rows;
        self
    }

    /// Earliest year whose ratios contribute to the index.
    pub fn first_retained_year(&self) -> i32 {
        self.current_year.saturating_sub(self.lookback_years)
    }
}
