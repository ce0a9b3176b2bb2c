//! Output collaborator: anything that accepts the assembled table.

use std::path::{Path, PathBuf};

use anyhow::Result;

use season_model::SeasonalityTable;

use crate::csv::write_seasonality_csv;

/// Destination for the final seasonality table.
pub trait SeasonalitySink {
    /// Short description used in logs and summaries.
    fn describe(&self) -> String;

    fn write_table(&mut self, table: &SeasonalityTable) -> Result<()>;

    /// File the table lands in, when the sink writes one.
    fn output_path(&self) -> Option<&Path> {
        None
    }
}

/// Writes the table to a CSV file, replacing any existing file.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeasonalitySink for CsvSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn write_table(&mut self, table: &SeasonalityTable) -> Result<()> {
        write_seasonality_csv(&self.path, table)
    }

    fn output_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Keeps every written table in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub tables: Vec<SeasonalityTable>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently written table.
    pub fn last(&self) -> Option<&SeasonalityTable> {
        self.tables.last()
    }
}

impl SeasonalitySink for MemorySink {
    fn describe(&self) -> String {
        "in-memory".to_string()
    }

    fn write_table(&mut self, table: &SeasonalityTable) -> Result<()> {
        self.tables.push(table.clone());
        Ok(())
    }
}
