//! Failures local to one (country, product) group.

use thiserror::Error;

use season_model::{IssueKind, Period, QualityIssue, SeriesKey};

/// A group-level failure. The group is excluded from the output and the
/// remaining groups are processed as usual.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroupError {
    /// The raw input contained the same (country, product, year, month) more than once.
    #[error("duplicate observations for {key} at {}", join_periods(.periods))]
    DuplicateKey {
        key: SeriesKey,
        periods: Vec<Period>,
        extra_rows: u64,
    },

    /// Monthly averages summed to zero or a non-finite value.
    #[error("seasonal averages for {key} sum to {sum}; cannot normalize to 12")]
    ZeroSeasonalSum { key: SeriesKey, sum: f64 },
}

impl GroupError {
    pub fn key(&self) -> &SeriesKey {
        match self {
            Self::DuplicateKey { key, .. } | Self::ZeroSeasonalSum { key, .. } => key,
        }
    }

    pub fn kind(&self) -> IssueKind {
        match self {
            Self::DuplicateKey { .. } => IssueKind::DuplicateKey,
            Self::ZeroSeasonalSum { .. } => IssueKind::ZeroSeasonalSum,
        }
    }

    /// Report entry for this failure.
    pub fn to_issue(&self) -> QualityIssue {
        let issue = QualityIssue::for_series(self.kind(), self.key(), self.to_string());
        match self {
            Self::DuplicateKey { extra_rows, .. } => issue.with_count(*extra_rows),
            Self::ZeroSeasonalSum { .. } => issue,
        }
    }
}

fn join_periods(periods: &[Period]) -> String {
    periods
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
