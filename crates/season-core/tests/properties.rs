//! Property tests for the seasonality invariants.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use season_core::{
    SeasonalRatio, is_contiguous, recency_weights, regularize, run_pipeline, trim_extremes,
};
use season_model::{Observation, Period, PipelineOptions, RawObservation, Series, SeriesKey};

fn rows_for(country: &str, product: &str, values: &[f64]) -> Vec<RawObservation> {
    values
        .iter()
        .enumerate()
        .map(|(offset, &value)| {
            let offset = offset as i64;
            RawObservation::numeric(country, product, 2010 + offset / 12, offset % 12 + 1, value)
        })
        .collect()
}

fn rows_from(values: &[f64]) -> Vec<RawObservation> {
    rows_for("A", "P", values)
}

fn ratio(year: i32, scaled: f64) -> SeasonalRatio {
    SeasonalRatio {
        period: Period::from_year_month(year.into(), 1).expect("valid period"),
        raw: scaled,
        scaled,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn indices_sum_to_twelve(values in prop::collection::vec(1.0..1000.0_f64, 13..72)) {
        let output = run_pipeline(&rows_from(&values), &PipelineOptions::new(2016));
        prop_assert!(!output.indices.is_empty());
        let total: f64 = output.indices.iter().map(|index| index.value).sum();
        prop_assert!((total - 12.0).abs() < 1e-6, "sum {}", total);
    }

    #[test]
    fn joined_table_indices_sum_to_twelve_per_pair(
        first in prop::collection::vec(1.0..1000.0_f64, 13..72),
        second in prop::collection::vec(1.0..1000.0_f64, 13..72),
    ) {
        let mut rows = rows_for("A", "P", &first);
        rows.extend(rows_for("B", "Q", &second));
        let output = run_pipeline(&rows, &PipelineOptions::new(2016));

        let mut per_pair: BTreeMap<(String, String), BTreeMap<u32, f64>> = BTreeMap::new();
        for row in &output.table.rows {
            if let Some(index) = row.seasonal_index {
                per_pair
                    .entry((row.country.clone(), row.product.clone()))
                    .or_default()
                    .insert(row.month, index);
            }
        }
        prop_assert_eq!(per_pair.len(), 2);
        for (pair, months) in &per_pair {
            let total: f64 = months.values().sum();
            prop_assert!((total - 12.0).abs() < 1e-6, "{:?} sum {}", pair, total);
        }
    }

    #[test]
    fn regularized_calendar_is_complete(
        offsets in prop::collection::btree_set(0_i64..60, 1..20),
    ) {
        let observations: Vec<Observation> = offsets
            .iter()
            .map(|&offset| {
                let period = Period::from_year_month(2015 + offset / 12, offset % 12 + 1)
                    .expect("valid period");
                Observation::observed(period, 1.0 + offset as f64)
            })
            .collect();
        let series = Series { key: SeriesKey::new("A", "P"), observations };

        let regularized = regularize(&series);
        prop_assert!(is_contiguous(&regularized));
        let first = offsets.iter().next().copied().unwrap_or_default();
        let last = offsets.iter().next_back().copied().unwrap_or_default();
        prop_assert_eq!(regularized.len() as i64, last - first + 1);
        prop_assert_eq!(
            regularized.len() - regularized.interpolated_count(),
            offsets.len()
        );
    }

    #[test]
    fn later_years_weigh_more(years in prop::collection::btree_set(1990_i32..2040, 2..12)) {
        let rows: Vec<SeasonalRatio> = years.iter().map(|&year| ratio(year, 1.0)).collect();
        let weights = recency_weights(&rows);
        let ordered: Vec<f64> = weights.values().copied().collect();
        prop_assert!(ordered.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn trimming_removes_one_max_and_one_min(
        values in prop::collection::vec(0.1..5.0_f64, 3..15),
    ) {
        let rows: Vec<SeasonalRatio> = values
            .iter()
            .enumerate()
            .map(|(offset, &value)| ratio(2000 + offset as i32, value))
            .collect();
        let trimmed = trim_extremes(rows, 3);
        prop_assert_eq!(trimmed.len(), values.len() - 2);

        let mut expected = values.clone();
        expected.sort_by(f64::total_cmp);
        expected.remove(0);
        expected.pop();
        let mut kept: Vec<f64> = trimmed.iter().map(|row| row.scaled).collect();
        kept.sort_by(f64::total_cmp);
        prop_assert_eq!(kept, expected);

        let kept_years: BTreeSet<i32> = trimmed.iter().map(SeasonalRatio::year).collect();
        prop_assert_eq!(kept_years.len(), trimmed.len());
    }
}
