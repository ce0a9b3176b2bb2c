//! JSON data-quality report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use season_model::QualityReport;

use crate::common::ensure_parent_dir;

/// Write `report` as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &QualityReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(report).context("serialize quality report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
