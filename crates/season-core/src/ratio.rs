//! Stage 4: seasonal ratios.

use std::collections::{BTreeMap, BTreeSet};

use season_model::{Period, Series};

use crate::trend::TrendPoint;

/// Ratio of an observation to its trend, before and after per-year scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalRatio {
    pub period: Period,
    /// `value / trend`.
    pub raw: f64,
    /// `raw` rescaled so the year's ratios sum to its month count.
    pub scaled: f64,
}

impl SeasonalRatio {
    pub fn year(&self) -> i32 {
        self.period.year()
    }

    pub fn month(&self) -> u32 {
        self.period.month()
    }
}

#[derive(Default)]
struct YearTotals {
    sum: f64,
    months: BTreeSet<u32>,
}

/// Compute scaled seasonal ratios for every observation that has a trend.
///
/// `trend` must be aligned with `series.observations`. Scaling uses every
/// ratio of a year, so it happens before any retention filter.
pub fn seasonal_ratios(series: &Series, trend: &[TrendPoint]) -> Vec<SeasonalRatio> {
    let raw: Vec<(Period, f64)> = series
        .observations
        .iter()
        .zip(trend)
        .filter_map(|(obs, point)| point.trend.map(|trend| (obs.period, obs.value / trend)))
        .collect();

    let mut totals: BTreeMap<i32, YearTotals> = BTreeMap::new();
    for (period, ratio) in &raw {
        let entry = totals.entry(period.year()).or_default();
        entry.sum += ratio;
        entry.months.insert(period.month());
    }

    raw.into_iter()
        .map(|(period, raw)| {
            let scaled = totals.get(&period.year()).map_or(raw, |year| {
                raw / year.sum * year.months.len() as f64
            });
            SeasonalRatio {
                period,
                raw,
                scaled,
            }
        })
        .collect()
}

/// Keep ratios whose year is at or after `first_year`.
pub fn retain_recent(ratios: Vec<SeasonalRatio>, first_year: i32) -> Vec<SeasonalRatio> {
    ratios
        .into_iter()
        .filter(|ratio| ratio.year() >= first_year)
        .collect()
}
