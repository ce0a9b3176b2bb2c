//! Group-isolating pipeline driver.
//!
//! Rows are cleaned once, then every (country, product) pair runs through
//! regularization, trend, ratios, averaging and normalization on its own.
//! A failing pair is reported and left out of the output; the others are
//! unaffected.

use std::collections::BTreeMap;
use std::time::Instant;

use season_ingest::ObservationSource;
use season_model::{
    GroupStatus, GroupSummary, IssueKind, MONTHS_PER_YEAR, PipelineOptions, QualityIssue,
    QualityReport, RawObservation, SeasonalIndex, SeasonalityTable, Series, SeriesKey,
};
use tracing::{debug, info, info_span, warn};

use crate::assemble::{IndexLookup, assemble};
use crate::average::monthly_averages;
use crate::calendar::regularize;
use crate::clean::clean_observations;
use crate::error::GroupError;
use crate::normalize::normalize;
use crate::ratio::{retain_recent, seasonal_ratios};
use crate::trend::{MIN_TREND_LENGTH, extract_trend};

/// Everything a run produces.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Regularized history of every surviving pair with its seasonal index.
    pub table: SeasonalityTable,
    /// Seasonal indices ordered by (product, country, month).
    pub indices: Vec<SeasonalIndex>,
    /// One summary per pair, ordered by key.
    pub groups: Vec<GroupSummary>,
    pub report: QualityReport,
}

impl PipelineOutput {
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }

    pub fn failed_groups(&self) -> usize {
        self.groups
            .iter()
            .filter(|group| group.status == GroupStatus::Failed)
            .count()
    }
}

/// Result of one pair that made it through the pipeline.
#[derive(Debug, Clone)]
pub struct GroupOutcome {
    pub regularized: Series,
    pub index: BTreeMap<u32, f64>,
    pub summary: GroupSummary,
    /// Warnings specific to this pair.
    pub issues: Vec<QualityIssue>,
}

fn status_for(index_months: usize) -> GroupStatus {
    match index_months {
        0 => GroupStatus::NoIndex,
        months if months >= MONTHS_PER_YEAR as usize => GroupStatus::Complete,
        _ => GroupStatus::Partial,
    }
}

fn missing_months(index: &BTreeMap<u32, f64>) -> String {
    (1..=MONTHS_PER_YEAR)
        .filter(|month| !index.contains_key(month))
        .map(|month| month.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run stages 2 to 6 for one cleaned pair.
pub fn process_group(series: &Series, options: &PipelineOptions) -> Result<GroupOutcome, GroupError> {
    let regularized = regularize(series);
    let trend = extract_trend(&regularized);
    let trend_points = trend.iter().filter(|point| point.trend.is_some()).count();

    let first_year = options.first_retained_year();
    let ratios = retain_recent(seasonal_ratios(&regularized, &trend), first_year);
    let averages = monthly_averages(&ratios, options.min_rows_for_trim);
    let index = normalize(&regularized.key, &averages)?;

    let key = &regularized.key;
    let mut issues = Vec::new();
    if index.is_empty() {
        let message = if regularized.len() < MIN_TREND_LENGTH {
            format!(
                "{} regularized month(s); a trend needs at least {MIN_TREND_LENGTH}",
                regularized.len()
            )
        } else {
            format!("no seasonal ratios from {first_year} onward ({trend_points} trend points)")
        };
        issues.push(QualityIssue::for_series(
            IssueKind::InsufficientHistory,
            key,
            message,
        ));
    } else if index.len() < MONTHS_PER_YEAR as usize {
        issues.push(QualityIssue::for_series(
            IssueKind::IncompleteIndex,
            key,
            format!("no seasonal index for month(s) {}", missing_months(&index)),
        ));
    }

    let interpolated = regularized.interpolated_count();
    let summary = GroupSummary {
        key: key.clone(),
        observed: regularized.len() - interpolated,
        interpolated,
        trend_points,
        retained_ratios: ratios.len(),
        index_months: index.len(),
        status: status_for(index.len()),
    };

    Ok(GroupOutcome {
        regularized,
        index,
        summary,
        issues,
    })
}

/// Run the full pipeline over raw rows.
pub fn run_pipeline(rows: &[RawObservation], options: &PipelineOptions) -> PipelineOutput {
    let span = info_span!(
        "seasonality",
        current_year = options.current_year,
        lookback_years = options.lookback_years
    );
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = QualityReport::default();
    let mut cleaned = clean_observations(rows, options);
    report.extend(cleaned.drop_issues());
    debug!(
        input_rows = rows.len(),
        dropped_rows = cleaned.dropped_total(),
        groups = cleaned.series.len(),
        "cleaning complete"
    );

    let mut summaries: BTreeMap<SeriesKey, GroupSummary> = BTreeMap::new();
    let mut lookup = IndexLookup::new();
    let mut regularized = Vec::with_capacity(cleaned.series.len());
    let mut duplicates = std::mem::take(&mut cleaned.duplicates);

    for series in &cleaned.series {
        let group_span = info_span!(
            "group",
            country = %series.key.country,
            product = %series.key.product
        );
        let _group_guard = group_span.enter();
        let group_start = Instant::now();

        let result = match duplicates.remove(&series.key) {
            Some((periods, extra_rows)) => Err(GroupError::DuplicateKey {
                key: series.key.clone(),
                periods,
                extra_rows,
            }),
            None => process_group(series, options),
        };

        match result {
            Ok(outcome) => {
                for issue in &outcome.issues {
                    warn!(code = %issue.code, "{}", issue.message);
                }
                debug!(
                    rows = outcome.summary.rows(),
                    interpolated = outcome.summary.interpolated,
                    index_months = outcome.summary.index_months,
                    duration_ms = group_start.elapsed().as_millis(),
                    "group complete"
                );
                report.extend(outcome.issues);
                lookup.insert(series.key.clone(), outcome.index);
                summaries.insert(series.key.clone(), outcome.summary);
                regularized.push(outcome.regularized);
            }
            Err(err) => {
                warn!(error = %err, "group excluded");
                report.push(err.to_issue());
                summaries.insert(series.key.clone(), GroupSummary::failed(series.key.clone()));
            }
        }
    }

    // Duplicated pairs whose rows were all dropped during cleaning.
    for (key, (periods, extra_rows)) in duplicates {
        let err = GroupError::DuplicateKey {
            key: key.clone(),
            periods,
            extra_rows,
        };
        warn!(error = %err, "group excluded");
        report.push(err.to_issue());
        summaries.insert(key.clone(), GroupSummary::failed(key));
    }

    let table = assemble(&regularized, &lookup);
    let output = PipelineOutput {
        table,
        indices: lookup.to_indices(),
        groups: summaries.into_values().collect(),
        report,
    };
    info!(
        groups = output.groups.len(),
        failed_groups = output.failed_groups(),
        output_rows = output.table.len(),
        errors = output.report.error_count(),
        warnings = output.report.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "seasonality complete"
    );
    output
}

/// Read every row from `source` and run the pipeline over them.
pub fn run_source<S>(source: &S, options: &PipelineOptions) -> season_ingest::Result<PipelineOutput>
where
    S: ObservationSource + ?Sized,
{
    let rows = info_span!("ingest", source = %source.describe()).in_scope(|| {
        let start = Instant::now();
        let rows = source.read_observations()?;
        info!(
            rows = rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok::<_, season_ingest::IngestError>(rows)
    })?;
    Ok(run_pipeline(&rows, options))
}
