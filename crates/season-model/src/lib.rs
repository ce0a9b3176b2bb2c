//! Shared value types for the seasonality workspace.

pub mod observation;
pub mod options;
pub mod quality;
pub mod table;

pub use observation::{
    MONTHS_PER_YEAR, Observation, Period, RawObservation, RawValue, Series, SeriesKey,
    ValueOrigin,
};
pub use options::{
    DEFAULT_LOOKBACK_YEARS, DEFAULT_MIN_ROWS_FOR_TRIM, DEFAULT_SENTINEL, PipelineOptions,
};
pub use quality::{IssueKind, IssueSeverity, QualityIssue, QualityReport};
pub use table::{GroupStatus, GroupSummary, SeasonalIndex, SeasonalityRow, SeasonalityTable};
