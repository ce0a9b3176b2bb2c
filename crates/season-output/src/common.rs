//! Shared helpers for output files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "seasonality_ratios.csv";

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Default output location: next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(DEFAULT_OUTPUT_FILE),
        _ => PathBuf::from(DEFAULT_OUTPUT_FILE),
    }
}
