use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use season_core::run_source;
use season_ingest::{CsvObservationSource, ObservationSource};
use season_output::{CsvSink, SeasonalitySink, write_index_csv, write_report_json};

use crate::types::{RunConfig, RunOutputs, RunResult};

/// Run the pipeline on the configured CSV input and write every requested output.
pub fn run_seasonality(config: &RunConfig) -> Result<RunResult> {
    let source = CsvObservationSource::new(&config.input);
    let mut sink = CsvSink::new(&config.output);
    execute(config, &source, &mut sink)
}

/// Run the pipeline between an arbitrary source and sink.
///
/// The index table and JSON report, when configured, are written next to
/// whatever the sink produces. Nothing is written on a dry run.
pub fn execute(
    config: &RunConfig,
    source: &dyn ObservationSource,
    sink: &mut dyn SeasonalitySink,
) -> Result<RunResult> {
    let run_span = info_span!("run", source = %source.describe());
    let _run_guard = run_span.enter();

    let output = run_source(source, &config.options)
        .with_context(|| format!("read {}", source.describe()))?;

    let mut outputs = RunOutputs::default();
    if !config.dry_run {
        info_span!("write", sink = %sink.describe()).in_scope(|| -> Result<()> {
            let start = Instant::now();
            sink.write_table(&output.table)
                .with_context(|| format!("write {}", sink.describe()))?;
            outputs.table = sink.output_path().map(Path::to_path_buf);
            if let Some(path) = &config.index_output {
                write_index_csv(path, &output.indices)?;
                outputs.index = Some(path.clone());
            }
            if let Some(path) = &config.report {
                write_report_json(path, &output.report)?;
                outputs.report = Some(path.clone());
            }
            info!(
                rows = output.table.len(),
                index_cells = output.indices.len(),
                duration_ms = start.elapsed().as_millis(),
                "outputs written"
            );
            Ok(())
        })?;
    }

    Ok(RunResult {
        source: source.describe(),
        options: config.options.clone(),
        outputs,
        output_rows: output.table.len(),
        index_cells: output.indices.len(),
        has_errors: output.has_errors(),
        groups: output.groups,
        report: output.report,
    })
}
