//! Multiplicative seasonality crate.
//!
//! Turns raw monthly demand rows into one normalized seasonal index per
//! (country, product, month-of-year).
//!
//! # Overview
//!
//! Each (country, product) pair runs through these stages in order:
//! - **Cleaning**: coerce values, drop unusable rows, group and sort by period
//! - **Calendar**: insert missing months and fill them by linear interpolation
//! - **Trend**: centered 2x12 moving average
//! - **Ratios**: value / trend, scaled within each year
//! - **Averaging**: trim the extreme years per month, then weight by recency
//! - **Normalization**: rescale so the pair's indices sum to 12
//! - **Assembly**: join the index back onto every regularized month
//!
//! # Example
//!
//! ```ignore
//! use season_core::run_pipeline;
//! use season_model::PipelineOptions;
//!
//! let output = run_pipeline(&rows, &PipelineOptions::new(2025));
//! for index in &output.indices {
//!     println!("{} {:>2} {:.4}", index.key, index.month, index.value);
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Group isolation**: a failing pair is reported and excluded, never fatal to the run
//! - **Injected clock**: the retention window is measured from a caller-supplied year
//! - **Typed gaps**: positions without a trend are `None`, never a sentinel float

mod assemble;
mod average;
mod calendar;
mod clean;
mod error;
mod normalize;
mod pipeline;
mod ratio;
mod trend;

// Error type
pub use error::GroupError;

// Stages
pub use assemble::{IndexLookup, assemble, assemble_series};
pub use average::{monthly_averages, recency_weights, trim_extremes, weighted_average};
pub use calendar::{interpolate_linear, is_contiguous, regularize};
pub use clean::{CleanedObservations, DropReason, clean_observations, coerce_value};
pub use normalize::normalize;
pub use ratio::{SeasonalRatio, retain_recent, seasonal_ratios};
pub use trend::{
    MIN_TREND_LENGTH, RollingMean, TREND_WINDOW, TrendPoint, centered_trend, extract_trend,
};

// Driver
pub use pipeline::{GroupOutcome, PipelineOutput, process_group, run_pipeline, run_source};
