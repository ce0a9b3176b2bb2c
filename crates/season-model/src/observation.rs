//! Observation records as they move from raw input to regularized series.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of calendar months in a seasonal cycle.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Raw value cell exactly as the input source produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum RawValue {
    Number(f64),
    Text(String),
    Missing,
}

impl RawValue {
    /// Build a raw value from a text cell, mapping blank text to `Missing`.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::Missing
        } else {
            Self::Text(trimmed.to_string())
        }
    }
}

/// One input row before cleaning.
///
/// Year and month are kept as the source parsed them so that out-of-range
/// keys can be reported instead of rejected at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub country: String,
    pub product: String,
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub value: RawValue,
}

impl RawObservation {
    pub fn new(
        country: impl Into<String>,
        product: impl Into<String>,
        year: i64,
        month: i64,
        value: RawValue,
    ) -> Self {
        Self {
            country: country.into(),
            product: product.into(),
            year: Some(year),
            month: Some(month),
            value,
        }
    }

    /// Convenience constructor for a numeric row.
    pub fn numeric(
        country: impl Into<String>,
        product: impl Into<String>,
        year: i64,
        month: i64,
        value: f64,
    ) -> Self {
        Self::new(country, product, year, month, RawValue::Number(value))
    }
}

/// Grouping key of a series: one (country, product) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub country: String,
    pub product: String,
}

impl SeriesKey {
    pub fn new(country: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            product: product.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.country, self.product)
    }
}

/// A calendar month, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period(NaiveDate);

impl Period {
    /// Returns `None` when the month is outside 1..=12 or the year is not
    /// representable as a calendar date.
    pub fn from_year_month(year: i64, month: i64) -> Option<Self> {
        let year = i32::try_from(year).ok()?;
        let month = u32::try_from(month).ok()?;
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// The following calendar month.
    pub fn succ(self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// Signed number of months from `earlier` to `self`.
    pub fn months_since(self, earlier: Self) -> i64 {
        self.ordinal() - earlier.ordinal()
    }

    fn ordinal(self) -> i64 {
        i64::from(self.year()) * i64::from(MONTHS_PER_YEAR) + i64::from(self.month()) - 1
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Whether a regularized value was read from input or filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueOrigin {
    Observed,
    Interpolated,
}

/// A cleaned, strictly positive monthly observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: Period,
    pub value: f64,
    pub origin: ValueOrigin,
}

impl Observation {
    pub fn observed(period: Period, value: f64) -> Self {
        Self {
            period,
            value,
            origin: ValueOrigin::Observed,
        }
    }

    pub fn interpolated(period: Period, value: f64) -> Self {
        Self {
            period,
            value,
            origin: ValueOrigin::Interpolated,
        }
    }
}

/// All observations of one (country, product) pair, ordered by period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: SeriesKey,
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn new(key: SeriesKey) -> Self {
        Self {
            key,
            observations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn interpolated_count(&self) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.origin == ValueOrigin::Interpolated)
            .count()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.value).collect()
    }
}
