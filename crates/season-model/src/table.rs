use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::observation::SeriesKey;

/// Final seasonal multiplier for one (country, product, month-of-year) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalIndex {
    pub key: SeriesKey,
    pub month: u32,
    pub value: f64,
}

/// One row of the assembled output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityRow {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub country: String,
    pub product: String,
    pub value: f64,
    pub seasonal_index: Option<f64>,
}

/// The assembled output: every regularized observation with its index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityTable {
    pub rows: Vec<SeasonalityRow>,
}

impl SeasonalityTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_for<'a>(
        &'a self,
        country: &'a str,
        product: &'a str,
    ) -> impl Iterator<Item = &'a SeasonalityRow> {
        self.rows
            .iter()
            .filter(move |row| row.country == country && row.product == product)
    }
}

/// Outcome of processing one (country, product) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    /// All twelve months carry an index.
    Complete,
    /// Some months carry an index.
    Partial,
    /// The pair is in the output without any index.
    NoIndex,
    /// The pair failed and was excluded from the output.
    Failed,
}

/// Per-pair counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: SeriesKey,
    pub observed: usize,
    pub interpolated: usize,
    pub trend_points: usize,
    pub retained_ratios: usize,
    pub index_months: usize,
    pub status: GroupStatus,
}

impl GroupSummary {
    pub fn failed(key: SeriesKey) -> Self {
        Self {
            key,
            observed: 0,
            interpolated: 0,
            trend_points: 0,
            retained_ratios: 0,
            index_months: 0,
            status: GroupStatus::Failed,
        }
    }

    pub fn rows(&self) -> usize {
        self.observed + self.interpolated
    }
}
