//! Input collaborator: anything that yields raw observation rows.

use std::path::PathBuf;

use season_model::RawObservation;

use crate::csv::read_observations;
use crate::error::Result;

/// A source of raw `{country, product, year, month, value}` rows.
pub trait ObservationSource {
    /// Short description used in logs and summaries.
    fn describe(&self) -> String;

    /// Read every row from the source.
    fn read_observations(&self) -> Result<Vec<RawObservation>>;
}

/// CSV file with `Country, Product, Year, Month, Value` columns.
#[derive(Debug, Clone)]
pub struct CsvObservationSource {
    path: PathBuf,
}

impl CsvObservationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ObservationSource for CsvObservationSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_observations(&self) -> Result<Vec<RawObservation>> {
        read_observations(&self.path)
    }
}

impl ObservationSource for Vec<RawObservation> {
    fn describe(&self) -> String {
        format!("in-memory ({} rows)", self.len())
    }

    fn read_observations(&self) -> Result<Vec<RawObservation>> {
        Ok(self.clone())
    }
}
