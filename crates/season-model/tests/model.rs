//! Tests for season-model types.

use season_model::{
    IssueKind, IssueSeverity, PipelineOptions, QualityIssue, QualityReport, SeriesKey,
};

#[test]
fn quality_report_counts() {
    let key = SeriesKey::new("Norway", "Diesel");
    let mut report = QualityReport::default();
    report.push(
        QualityIssue::for_series(IssueKind::NonPositiveValue, &key, "dropped rows").with_count(2),
    );
    report.push(QualityIssue::for_series(
        IssueKind::DuplicateKey,
        &key,
        "duplicate 2020-01",
    ));
    report.push(QualityIssue::new(IssueKind::InvalidKey, "month 13").with_count(1));

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 2);
    assert!(report.has_errors());
    assert_eq!(report.issues_for(&key).count(), 2);
    assert_eq!(report.count_of(IssueKind::InvalidKey), 1);
}

#[test]
fn issue_kind_severity_and_code() {
    assert_eq!(IssueKind::ZeroSeasonalSum.severity(), IssueSeverity::Error);
    assert_eq!(IssueKind::InsufficientHistory.severity(), IssueSeverity::Warning);
    assert_eq!(IssueKind::DuplicateKey.code(), "SQ010");
}

#[test]
fn report_serializes() {
    let key = SeriesKey::new("Saudi Arabia", "Jet");
    let mut report = QualityReport::default();
    report.push(QualityIssue::for_series(
        IssueKind::IncompleteIndex,
        &key,
        "3 months without index",
    ));
    let json = serde_json::to_string(&report).expect("serialize report");
    assert!(json.contains("\"incomplete_index\""));
    assert!(json.contains("\"warning\""));
    let round: QualityReport = serde_json::from_str(&json).expect("deserialize report");
    assert_eq!(round, report);
}

#[test]
fn options_retention_window() {
    let options = PipelineOptions::new(2026);
    assert_eq!(options.first_retained_year(), 2016);
    assert_eq!(options.sentinel, "NODATA");

    let narrowed = options.with_lookback_years(3).with_min_rows_for_trim(5);
    assert_eq!(narrowed.first_retained_year(), 2023);
    assert_eq!(narrowed.min_rows_for_trim, 5);
}
