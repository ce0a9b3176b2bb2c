//! Header resolution for observation tables.

use std::path::Path;

use crate::cells::normalize_label;
use crate::error::{IngestError, Result};

pub const COUNTRY_COLUMN: &str = "Country";
pub const PRODUCT_COLUMN: &str = "Product";
pub const YEAR_COLUMN: &str = "Year";
pub const MONTH_COLUMN: &str = "Month";
pub const VALUE_COLUMN: &str = "Value";

/// Actual header names of the five observation columns in a source file.
///
/// Names are matched case-insensitively after whitespace normalization;
/// any other columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationColumns {
    pub country: String,
    pub product: String,
    pub year: String,
    pub month: String,
    pub value: String,
}

impl ObservationColumns {
    pub fn resolve(headers: &[String], path: &Path) -> Result<Self> {
        Ok(Self {
            country: find_column(headers, COUNTRY_COLUMN, path)?,
            product: find_column(headers, PRODUCT_COLUMN, path)?,
            year: find_column(headers, YEAR_COLUMN, path)?,
            month: find_column(headers, MONTH_COLUMN, path)?,
            value: find_column(headers, VALUE_COLUMN, path)?,
        })
    }
}

fn find_column(headers: &[String], wanted: &str, path: &Path) -> Result<String> {
    let mut matches = headers
        .iter()
        .filter(|header| normalize_label(header).eq_ignore_ascii_case(wanted));
    let Some(found) = matches.next() else {
        return Err(IngestError::MissingColumn {
            column: wanted.to_string(),
            path: path.to_path_buf(),
        });
    };
    if matches.next().is_some() {
        return Err(IngestError::AmbiguousColumn {
            column: wanted.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(found.clone())
}
