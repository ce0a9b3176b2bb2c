//! Stage 1: ingestion cleaning.
//!
//! Raw rows are validated, value cells coerced to positive floats, and the
//! survivors grouped into per-(country, product) series sorted by period.
//! Every dropped row is counted by reason so it can be reported.

use std::collections::BTreeMap;

use season_ingest::parse_f64;
use season_model::{
    IssueKind, Observation, Period, PipelineOptions, QualityIssue, RawObservation, RawValue,
    Series, SeriesKey,
};

/// Why a raw row did not survive cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DropReason {
    InvalidKey,
    MissingValue,
    NonNumericValue,
    NonPositiveValue,
}

impl DropReason {
    fn issue_kind(self) -> IssueKind {
        match self {
            Self::InvalidKey => IssueKind::InvalidKey,
            Self::MissingValue => IssueKind::MissingValue,
            Self::NonNumericValue => IssueKind::NonNumericValue,
            Self::NonPositiveValue => IssueKind::NonPositiveValue,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::InvalidKey => "country, product, year, or month is not usable",
            Self::MissingValue => "value is missing",
            Self::NonNumericValue => "value is not numeric",
            Self::NonPositiveValue => "value is zero, negative, or the no-data marker",
        }
    }
}

/// Output of the cleaning stage.
#[derive(Debug, Clone, Default)]
pub struct CleanedObservations {
    /// Surviving observations grouped by pair, each sorted by period.
    pub series: Vec<Series>,
    /// Periods that occur more than once in the raw input, per pair, with
    /// the number of surplus rows.
    pub duplicates: BTreeMap<SeriesKey, (Vec<Period>, u64)>,
    /// Dropped row counts by pair (when the key was usable) and reason.
    pub dropped: BTreeMap<(Option<SeriesKey>, DropReason), u64>,
}

impl CleanedObservations {
    pub fn dropped_total(&self) -> u64 {
        self.dropped.values().sum()
    }

    /// One warning per (pair, reason) with the number of rows dropped.
    pub fn drop_issues(&self) -> Vec<QualityIssue> {
        self.dropped
            .iter()
            .map(|((key, reason), count)| {
                let message = format!("{count} row(s) dropped: {}", reason.describe());
                let issue = match key {
                    Some(key) => QualityIssue::for_series(reason.issue_kind(), key, message),
                    None => QualityIssue::new(reason.issue_kind(), message),
                };
                issue.with_count(*count)
            })
            .collect()
    }
}

/// Coerce a raw value cell to a usable demand value.
///
/// The sentinel marker counts as zero, so it is rejected as non-positive.
pub fn coerce_value(value: &RawValue, sentinel: &str) -> Result<f64, DropReason> {
    let number = match value {
        RawValue::Missing => return Err(DropReason::MissingValue),
        RawValue::Number(number) => *number,
        RawValue::Text(text) if text.trim() == sentinel => 0.0,
        RawValue::Text(text) => parse_f64(text).ok_or(DropReason::NonNumericValue)?,
    };
    if number.is_nan() {
        return Err(DropReason::MissingValue);
    }
    if number.is_infinite() {
        return Err(DropReason::NonNumericValue);
    }
    if number <= 0.0 {
        return Err(DropReason::NonPositiveValue);
    }
    Ok(number)
}

fn row_key(row: &RawObservation) -> Option<(SeriesKey, Period)> {
    let country = row.country.trim();
    let product = row.product.trim();
    if country.is_empty() || product.is_empty() {
        return None;
    }
    let period = Period::from_year_month(row.year?, row.month?)?;
    Some((SeriesKey::new(country, product), period))
}

/// Clean raw rows into sorted per-pair series.
pub fn clean_observations(rows: &[RawObservation], options: &PipelineOptions) -> CleanedObservations {
    let mut cleaned = CleanedObservations::default();
    let mut occurrences: BTreeMap<(SeriesKey, Period), u64> = BTreeMap::new();
    let mut grouped: BTreeMap<SeriesKey, Vec<Observation>> = BTreeMap::new();

    for row in rows {
        let Some((key, period)) = row_key(row) else {
            *cleaned
                .dropped
                .entry((None, DropReason::InvalidKey))
                .or_insert(0) += 1;
            continue;
        };
        *occurrences.entry((key.clone(), period)).or_insert(0) += 1;
        match coerce_value(&row.value, &options.sentinel) {
            Ok(value) => grouped
                .entry(key)
                .or_default()
                .push(Observation::observed(period, value)),
            Err(reason) => {
                *cleaned.dropped.entry((Some(key), reason)).or_insert(0) += 1;
            }
        }
    }

    for ((key, period), count) in occurrences {
        if count > 1 {
            let entry = cleaned.duplicates.entry(key).or_default();
            entry.0.push(period);
            entry.1 += count - 1;
        }
    }

    cleaned.series = grouped
        .into_iter()
        .map(|(key, mut observations)| {
            observations.sort_by_key(|obs| obs.period);
            Series { key, observations }
        })
        .collect();
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> PipelineOptions {
        PipelineOptions::new(2026)
    }

    #[test]
    fn coerce_value_rules() {
        assert_eq!(coerce_value(&RawValue::Number(4.0), "NODATA"), Ok(4.0));
        assert_eq!(
            coerce_value(&RawValue::Text(" 2.5 ".into()), "NODATA"),
            Ok(2.5)
        );
        assert_eq!(
            coerce_value(&RawValue::Text("NODATA".into()), "NODATA"),
            Err(DropReason::NonPositiveValue)
        );
        assert_eq!(
            coerce_value(&RawValue::Text("n/a".into()), "NODATA"),
            Err(DropReason::NonNumericValue)
        );
        assert_eq!(
            coerce_value(&RawValue::Number(-1.0), "NODATA"),
            Err(DropReason::NonPositiveValue)
        );
        assert_eq!(
            coerce_value(&RawValue::Number(f64::NAN), "NODATA"),
            Err(DropReason::MissingValue)
        );
        assert_eq!(
            coerce_value(&RawValue::Missing, "NODATA"),
            Err(DropReason::MissingValue)
        );
    }

    #[test]
    fn custom_sentinel_is_honoured() {
        assert_eq!(
            coerce_value(&RawValue::Text("--".into()), "--"),
            Err(DropReason::NonPositiveValue)
        );
        assert_eq!(
            coerce_value(&RawValue::Text("NODATA".into()), "--"),
            Err(DropReason::NonNumericValue)
        );
    }

    #[test]
    fn groups_are_sorted_by_key_then_period() {
        let rows = vec![
            RawObservation::numeric("B", "X", 2020, 2, 1.0),
            RawObservation::numeric("A", "Y", 2021, 1, 1.0),
            RawObservation::numeric("A", "Y", 2020, 12, 1.0),
            RawObservation::numeric("A", "X", 2020, 5, 1.0),
        ];
        let cleaned = clean_observations(&rows, &options());
        let keys: Vec<String> = cleaned.series.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["A/X", "A/Y", "B/X"]);
        let periods: Vec<String> = cleaned.series[1]
            .observations
            .iter()
            .map(|obs| obs.period.to_string())
            .collect();
        assert_eq!(periods, vec!["2020-12", "2021-01"]);
    }

    #[test]
    fn invalid_rows_are_counted_by_reason() {
        let rows = vec![
            RawObservation::numeric("A", "P", 2020, 1, 10.0),
            RawObservation::new("A", "P", 2020, 2, RawValue::Text("NODATA".into())),
            RawObservation::numeric("A", "P", 2020, 3, -5.0),
            RawObservation::new("A", "P", 2020, 4, RawValue::Missing),
            RawObservation::numeric("A", "P", 2020, 13, 10.0),
            RawObservation::numeric("", "P", 2020, 5, 10.0),
        ];
        let cleaned = clean_observations(&rows, &options());
        let key = SeriesKey::new("A", "P");

        assert_eq!(cleaned.series.len(), 1);
        assert_eq!(cleaned.series[0].len(), 1);
        assert_eq!(
            cleaned
                .dropped
                .get(&(Some(key.clone()), DropReason::NonPositiveValue)),
            Some(&2)
        );
        assert_eq!(
            cleaned.dropped.get(&(Some(key), DropReason::MissingValue)),
            Some(&1)
        );
        assert_eq!(cleaned.dropped.get(&(None, DropReason::InvalidKey)), Some(&2));
        assert_eq!(cleaned.dropped_total(), 5);
        assert_eq!(cleaned.drop_issues().len(), 3);
    }

    #[test]
    fn duplicates_are_detected_on_raw_keys() {
        let rows = vec![
            RawObservation::numeric("A", "P", 2020, 1, 10.0),
            RawObservation::new("A", "P", 2020, 1, RawValue::Text("NODATA".into())),
            RawObservation::numeric("A", "P", 2020, 2, 10.0),
            RawObservation::numeric("B", "P", 2020, 1, 10.0),
        ];
        let cleaned = clean_observations(&rows, &options());
        let (periods, extra) = cleaned
            .duplicates
            .get(&SeriesKey::new("A", "P"))
            .expect("duplicate recorded");
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].to_string(), "2020-01");
        assert_eq!(*extra, 1);
        assert!(!cleaned.duplicates.contains_key(&SeriesKey::new("B", "P")));
    }
}
