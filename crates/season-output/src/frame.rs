//! Conversion of pipeline results into Polars frames.

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, NamedFrom, Series};

use season_model::{SeasonalIndex, SeasonalityTable};

/// Column order of the assembled seasonality table.
pub const SEASONALITY_COLUMNS: [&str; 7] = [
    "date",
    "year",
    "month",
    "country",
    "product",
    "value",
    "seasonal_index",
];

/// Column order of the seasonal index table.
pub const INDEX_COLUMNS: [&str; 4] = ["country", "product", "month", "seasonal_index"];

/// Build the output frame; dates are rendered as `YYYY-MM-DD`.
pub fn seasonality_frame(table: &SeasonalityTable) -> Result<DataFrame> {
    let rows = &table.rows;
    let date: Vec<String> = rows
        .iter()
        .map(|row| row.date.format("%Y-%m-%d").to_string())
        .collect();
    let year: Vec<i32> = rows.iter().map(|row| row.year).collect();
    let month: Vec<i64> = rows.iter().map(|row| i64::from(row.month)).collect();
    let country: Vec<&str> = rows.iter().map(|row| row.country.as_str()).collect();
    let product: Vec<&str> = rows.iter().map(|row| row.product.as_str()).collect();
    let value: Vec<f64> = rows.iter().map(|row| row.value).collect();
    let seasonal_index: Vec<Option<f64>> = rows.iter().map(|row| row.seasonal_index).collect();

    DataFrame::new(vec![
        Series::new(SEASONALITY_COLUMNS[0].into(), date).into(),
        Series::new(SEASONALITY_COLUMNS[1].into(), year).into(),
        Series::new(SEASONALITY_COLUMNS[2].into(), month).into(),
        Series::new(SEASONALITY_COLUMNS[3].into(), country).into(),
        Series::new(SEASONALITY_COLUMNS[4].into(), product).into(),
        Series::new(SEASONALITY_COLUMNS[5].into(), value).into(),
        Series::new(SEASONALITY_COLUMNS[6].into(), seasonal_index).into(),
    ])
    .context("build seasonality frame")
}

/// Build the index frame, keeping the order of `indices`.
pub fn index_frame(indices: &[SeasonalIndex]) -> Result<DataFrame> {
    let country: Vec<&str> = indices.iter().map(|idx| idx.key.country.as_str()).collect();
    let product: Vec<&str> = indices.iter().map(|idx| idx.key.product.as_str()).collect();
    let month: Vec<i64> = indices.iter().map(|idx| i64::from(idx.month)).collect();
    let value: Vec<f64> = indices.iter().map(|idx| idx.value).collect();

    DataFrame::new(vec![
        Series::new(INDEX_COLUMNS[0].into(), country).into(),
        Series::new(INDEX_COLUMNS[1].into(), product).into(),
        Series::new(INDEX_COLUMNS[2].into(), month).into(),
        Series::new(INDEX_COLUMNS[3].into(), value).into(),
    ])
    .context("build seasonal index frame")
}
