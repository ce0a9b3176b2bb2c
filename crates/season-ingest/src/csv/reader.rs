//! CSV file reading into raw observation rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, DataType, SerReader};
use season_model::{RawObservation, RawValue};

use crate::cells::{normalize_label, parse_i64};
use crate::error::{IngestError, Result};

use super::header::ObservationColumns;

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a CSV file into a DataFrame with every column as text.
///
/// Schema inference is disabled so that sentinel markers mixed into the
/// value column never turn a numeric column into a parse failure.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

/// Converts a text frame into raw observation rows.
///
/// Rows where all five observation cells are blank are skipped.
pub fn frame_to_observations(df: &DataFrame, path: &Path) -> Result<Vec<RawObservation>> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let columns = ObservationColumns::resolve(&headers, path)?;

    let countries = text_column(df, &columns.country)?;
    let products = text_column(df, &columns.product)?;
    let years = text_column(df, &columns.year)?;
    let months = text_column(df, &columns.month)?;
    let values = text_column(df, &columns.value)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let cells = [
            countries[idx].as_deref(),
            products[idx].as_deref(),
            years[idx].as_deref(),
            months[idx].as_deref(),
            values[idx].as_deref(),
        ];
        if cells
            .iter()
            .all(|cell| cell.is_none_or(|text| text.trim().is_empty()))
        {
            continue;
        }
        rows.push(RawObservation {
            country: normalize_label(cells[0].unwrap_or_default()),
            product: normalize_label(cells[1].unwrap_or_default()),
            year: cells[2].and_then(parse_i64),
            month: cells[3].and_then(parse_i64),
            value: cells[4].map_or(RawValue::Missing, RawValue::from_text),
        });
    }
    Ok(rows)
}

/// Reads raw observation rows from a CSV file.
pub fn read_observations(path: &Path) -> Result<Vec<RawObservation>> {
    let df = read_csv_frame(path)?;
    let rows = frame_to_observations(&df, path)?;
    tracing::debug!(
        path = %path.display(),
        columns = df.width(),
        rows = rows.len(),
        "read observation table"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_observations_keeps_sentinel_as_text() {
        let file = create_temp_csv(
            "Country,Product,Year,Month,Value\nNorway,Diesel,2020,1,10.5\nNorway,Diesel,2020,2,NODATA\nNorway,Diesel,2020,3,\n",
        );
        let rows = read_observations(file.path()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].value, RawValue::Text("10.5".to_string()));
        assert_eq!(rows[1].value, RawValue::Text("NODATA".to_string()));
        assert_eq!(rows[2].value, RawValue::Missing);
        assert_eq!(rows[0].year, Some(2020));
        assert_eq!(rows[1].month, Some(2));
    }

    #[test]
    fn test_read_observations_unparseable_key_is_none() {
        let file = create_temp_csv("Country,Product,Year,Month,Value\nNorway,Diesel,2020,June,5\n");
        let rows = read_observations(file.path()).unwrap();
        assert_eq!(rows[0].month, None);
    }

    #[test]
    fn test_read_observations_missing_file() {
        let err = read_observations(Path::new("/nonexistent/demand.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, 0x43, 0x00]).unwrap();
        let err = validate_encoding(file.path()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }
}
