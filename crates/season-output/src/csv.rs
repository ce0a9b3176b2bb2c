//! CSV table writers.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use season_model::{SeasonalIndex, SeasonalityTable};

use crate::common::ensure_parent_dir;
use crate::frame::{index_frame, seasonality_frame};

/// Write a frame as a headed CSV file; null cells are left empty.
pub fn write_csv_frame(path: &Path, df: &mut DataFrame) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))
}

/// Write the assembled seasonality table.
pub fn write_seasonality_csv(path: &Path, table: &SeasonalityTable) -> Result<()> {
    let mut df = seasonality_frame(table)?;
    write_csv_frame(path, &mut df)
}

/// Write the per-cell seasonal index table.
pub fn write_index_csv(path: &Path, indices: &[SeasonalIndex]) -> Result<()> {
    let mut df = index_frame(indices)?;
    write_csv_frame(path, &mut df)
}
