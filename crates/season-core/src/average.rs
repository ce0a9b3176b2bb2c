//! Stage 5: outlier-trimmed, recency-weighted monthly averages.
//!
//! A cell is every retained ratio of one month-of-year within a pair. Cells
//! large enough lose their single highest and single lowest ratio, and the
//! rest are averaged with weights proportional to the calendar year.

use std::collections::{BTreeMap, BTreeSet};

use crate::ratio::SeasonalRatio;

/// Index of the extreme row, preferring the earliest year on ties.
fn extreme_position(rows: &[SeasonalRatio], better: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by_key(|&idx| rows[idx].year());
    let mut best: Option<usize> = None;
    for idx in order {
        match best {
            Some(current) if !better(rows[idx].scaled, rows[current].scaled) => {}
            _ => best = Some(idx),
        }
    }
    best
}

/// Drop one maximum and then one minimum row from a cell.
///
/// Cells with fewer than `min_rows` rows are returned unchanged. Among tied
/// extremes the row with the earliest year is dropped.
pub fn trim_extremes(mut rows: Vec<SeasonalRatio>, min_rows: usize) -> Vec<SeasonalRatio> {
    if rows.len() < min_rows.max(1) {
        return rows;
    }
    if let Some(max) = extreme_position(&rows, |a, b| a > b) {
        rows.remove(max);
    }
    if let Some(min) = extreme_position(&rows, |a, b| a < b) {
        rows.remove(min);
    }
    rows
}

/// Weight of each distinct year: `year / Σ distinct years`.
pub fn recency_weights(rows: &[SeasonalRatio]) -> BTreeMap<i32, f64> {
    let years: BTreeSet<i32> = rows.iter().map(SeasonalRatio::year).collect();
    let total: i64 = years.iter().map(|&year| i64::from(year)).sum();
    if total == 0 {
        return BTreeMap::new();
    }
    years
        .into_iter()
        .map(|year| (year, f64::from(year) / total as f64))
        .collect()
}

/// `Σ scaled * weight(year)` over a trimmed cell; `None` for an empty cell.
pub fn weighted_average(rows: &[SeasonalRatio]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let weights = recency_weights(rows);
    let total = rows
        .iter()
        .map(|row| row.scaled * weights.get(&row.year()).copied().unwrap_or(0.0))
        .sum();
    Some(total)
}

/// Trimmed weighted average for every month-of-year present in `ratios`.
pub fn monthly_averages(ratios: &[SeasonalRatio], min_rows_for_trim: usize) -> BTreeMap<u32, f64> {
    let mut cells: BTreeMap<u32, Vec<SeasonalRatio>> = BTreeMap::new();
    for ratio in ratios {
        cells.entry(ratio.month()).or_default().push(*ratio);
    }
    cells
        .into_iter()
        .filter_map(|(month, rows)| {
            let trimmed = trim_extremes(rows, min_rows_for_trim);
            weighted_average(&trimmed).map(|average| (month, average))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use season_model::Period;

    fn row(year: i32, scaled: f64) -> SeasonalRatio {
        SeasonalRatio {
            period: Period::from_year_month(year.into(), 3).unwrap(),
            raw: scaled,
            scaled,
        }
    }

    fn years(rows: &[SeasonalRatio]) -> Vec<i32> {
        rows.iter().map(SeasonalRatio::year).collect()
    }

    #[test]
    fn trims_single_max_and_min() {
        let rows = vec![row(2018, 1.0), row(2019, 3.0), row(2020, 0.5), row(2021, 2.0)];
        let trimmed = trim_extremes(rows, 3);
        assert_eq!(years(&trimmed), vec![2018, 2021]);
    }

    #[test]
    fn small_cells_are_not_trimmed() {
        let rows = vec![row(2019, 3.0), row(2020, 0.5)];
        assert_eq!(trim_extremes(rows.clone(), 3), rows);
    }

    #[test]
    fn ties_drop_earliest_year() {
        let rows = vec![row(2021, 2.0), row(2019, 2.0), row(2020, 1.0), row(2022, 1.0)];
        let trimmed = trim_extremes(rows, 3);
        // max tie 2019/2021 drops 2019, min tie 2020/2022 drops 2020.
        assert_eq!(years(&trimmed), vec![2021, 2022]);
    }

    #[test]
    fn three_equal_rows_keep_latest() {
        let rows = vec![row(2019, 1.0), row(2020, 1.0), row(2021, 1.0)];
        let trimmed = trim_extremes(rows, 3);
        assert_eq!(years(&trimmed), vec![2021]);
    }

    #[test]
    fn weights_sum_to_one_and_grow_with_year() {
        let weights = recency_weights(&[row(2019, 1.0), row(2020, 1.0)]);
        let total: f64 = weights.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(weights[&2020] > weights[&2019]);
        assert!((weights[&2019] - 2019.0 / 4039.0).abs() < 1e-15);
    }

    #[test]
    fn weighted_average_of_equal_ratios_is_that_ratio() {
        let avg = weighted_average(&[row(2019, 1.2), row(2020, 1.2)]).unwrap();
        assert!((avg - 1.2).abs() < 1e-12);
        assert_eq!(weighted_average(&[]), None);
    }

    #[test]
    fn monthly_averages_group_by_month() {
        let march = row(2020, 1.5);
        let mut april = row(2020, 0.5);
        april.period = Period::from_year_month(2020, 4).unwrap();
        let averages = monthly_averages(&[march, april], 3);
        assert_eq!(averages.len(), 2);
        assert!((averages[&3] - 1.5).abs() < 1e-12);
        assert!((averages[&4] - 0.5).abs() < 1e-12);
    }
}
