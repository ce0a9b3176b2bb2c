use std::path::PathBuf;

use season_model::{GroupSummary, PipelineOptions, QualityReport};

/// Fully resolved parameters of one `run` invocation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub index_output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub options: PipelineOptions,
    pub dry_run: bool,
}

/// Where each artifact of a run was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutputs {
    pub table: Option<PathBuf>,
    pub index: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RunResult {
    pub source: String,
    pub options: PipelineOptions,
    pub outputs: RunOutputs,
    pub groups: Vec<GroupSummary>,
    pub report: QualityReport,
    pub output_rows: usize,
    pub index_cells: usize,
    pub has_errors: bool,
}
