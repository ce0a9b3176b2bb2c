//! Stage 7: join seasonal indices back onto the regularized history.

use std::collections::BTreeMap;

use season_model::{SeasonalIndex, SeasonalityRow, SeasonalityTable, Series, SeriesKey};

/// Seasonal index lookup by (country, product, month-of-year).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexLookup {
    entries: BTreeMap<SeriesKey, BTreeMap<u32, f64>>,
}

impl IndexLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pair's normalized index, replacing any earlier one.
    pub fn insert(&mut self, key: SeriesKey, index: BTreeMap<u32, f64>) {
        self.entries.insert(key, index);
    }

    pub fn get(&self, key: &SeriesKey, month: u32) -> Option<f64> {
        self.entries.get(key)?.get(&month).copied()
    }

    /// Flat index list ordered by (product, country, month).
    pub fn to_indices(&self) -> Vec<SeasonalIndex> {
        let mut indices: Vec<SeasonalIndex> = self
            .entries
            .iter()
            .flat_map(|(key, months)| {
                months.iter().map(|(&month, &value)| SeasonalIndex {
                    key: key.clone(),
                    month,
                    value,
                })
            })
            .collect();
        indices.sort_by(|a, b| {
            (&a.key.product, &a.key.country, a.month).cmp(&(&b.key.product, &b.key.country, b.month))
        });
        indices
    }
}

/// Build output rows for one regularized series.
pub fn assemble_series(series: &Series, lookup: &IndexLookup) -> Vec<SeasonalityRow> {
    series
        .observations
        .iter()
        .map(|obs| SeasonalityRow {
            date: obs.period.first_day(),
            year: obs.period.year(),
            month: obs.period.month(),
            country: series.key.country.clone(),
            product: series.key.product.clone(),
            value: obs.value,
            seasonal_index: lookup.get(&series.key, obs.period.month()),
        })
        .collect()
}

/// Assemble the output table ordered by (country, product, year, month).
pub fn assemble<'a>(
    series: impl IntoIterator<Item = &'a Series>,
    lookup: &IndexLookup,
) -> SeasonalityTable {
    let mut rows: Vec<SeasonalityRow> = series
        .into_iter()
        .flat_map(|series| assemble_series(series, lookup))
        .collect();
    rows.sort_by(|a, b| {
        (&a.country, &a.product, a.date).cmp(&(&b.country, &b.product, b.date))
    });
    SeasonalityTable { rows }
}
