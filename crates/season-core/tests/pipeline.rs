//! End-to-end behavior of the seasonality pipeline.

use season_core::{PipelineOutput, run_pipeline};
use season_model::{GroupStatus, IssueKind, PipelineOptions, RawObservation, RawValue, SeriesKey};

/// Monthly rows starting at January of `first_year`, one per value.
fn monthly_rows(country: &str, product: &str, first_year: i64, values: &[f64]) -> Vec<RawObservation> {
    values
        .iter()
        .enumerate()
        .map(|(offset, &value)| {
            let offset = offset as i64;
            RawObservation::numeric(country, product, first_year + offset / 12, offset % 12 + 1, value)
        })
        .collect()
}

fn index_sum(output: &PipelineOutput) -> f64 {
    output.indices.iter().map(|index| index.value).sum()
}

fn january(output: &PipelineOutput) -> f64 {
    output
        .indices
        .iter()
        .find(|index| index.month == 1)
        .map(|index| index.value)
        .expect("january index")
}

#[test]
fn two_year_spike_stays_in_untrimmed_january_cell() {
    let mut values = vec![100.0; 24];
    values[12] = 200.0;
    let rows = monthly_rows("Norway", "Diesel", 2021, &values);

    let output = run_pipeline(&rows, &PipelineOptions::new(2025));

    assert_eq!(output.indices.len(), 12);
    assert!((index_sum(&output) - 12.0).abs() < 1e-6);
    let peak = january(&output);
    assert!(peak > 1.3, "january index {peak}");
    assert!(output.indices.iter().all(|index| index.value <= peak));
    assert_eq!(output.groups[0].status, GroupStatus::Complete);
}

#[test]
fn spike_is_trimmed_with_three_years_per_cell() {
    let mut values = vec![100.0; 48];
    values[12] = 200.0;
    let rows = monthly_rows("Norway", "Diesel", 2019, &values);

    let output = run_pipeline(&rows, &PipelineOptions::new(2025));

    assert_eq!(output.indices.len(), 12);
    assert!((index_sum(&output) - 12.0).abs() < 1e-6);
    for index in &output.indices {
        assert!((index.value - 1.0).abs() < 0.01, "{index:?}");
    }
    assert!(!output.has_errors());
}

#[test]
fn sentinel_and_negative_values_are_interpolated() {
    let mut rows = monthly_rows("Chile", "Jet", 2020, &[10.0, 20.0, 30.0, 40.0]);
    rows.push(RawObservation::new(
        "Chile",
        "Jet",
        2020,
        5,
        RawValue::Text("NODATA".to_string()),
    ));
    rows.push(RawObservation::numeric("Chile", "Jet", 2020, 6, -3.0));
    rows.push(RawObservation::numeric("Chile", "Jet", 2020, 7, 70.0));

    let output = run_pipeline(&rows, &PipelineOptions::new(2025));

    let values: Vec<f64> = output.table.rows.iter().map(|row| row.value).collect();
    assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    assert_eq!(output.groups[0].interpolated, 2);
    assert_eq!(output.groups[0].observed, 5);

    let key = SeriesKey::new("Chile", "Jet");
    let dropped = output
        .report
        .issues_for(&key)
        .find(|issue| issue.kind == IssueKind::NonPositiveValue)
        .expect("non-positive issue");
    assert_eq!(dropped.count, Some(2));
}

#[test]
fn retention_boundary_is_inclusive() {
    // Trend covers June 2019 through May 2021.
    let rows = monthly_rows("Peru", "Gasoline", 2019, &[100.0; 36]);

    let all = run_pipeline(&rows, &PipelineOptions::new(2029));
    assert_eq!(all.groups[0].retained_ratios, 24);

    let boundary = run_pipeline(&rows, &PipelineOptions::new(2030));
    assert_eq!(boundary.groups[0].retained_ratios, 17);
    assert_eq!(boundary.groups[0].index_months, 12);

    let excluded = run_pipeline(&rows, &PipelineOptions::new(2031));
    assert_eq!(excluded.groups[0].retained_ratios, 5);
    assert_eq!(excluded.groups[0].status, GroupStatus::Partial);
    assert_eq!(excluded.report.count_of(IssueKind::IncompleteIndex), 1);
    // Out-of-window years stay in the joined table.
    assert_eq!(excluded.table.len(), 36);
    assert!(excluded.table.rows.iter().any(|row| row.year == 2019));
}

#[test]
fn lookback_window_is_configurable() {
    let rows = monthly_rows("Peru", "Gasoline", 2019, &[100.0; 36]);
    let options = PipelineOptions::new(2025).with_lookback_years(4);
    let output = run_pipeline(&rows, &options);
    assert_eq!(output.groups[0].retained_ratios, 5);
}

#[test]
fn duplicate_keys_exclude_only_the_affected_pair() {
    let mut rows = monthly_rows("Kenya", "Jet", 2020, &[100.0; 24]);
    rows.extend(monthly_rows("Kenya", "Diesel", 2020, &[100.0; 24]));
    rows.push(RawObservation::numeric("Kenya", "Diesel", 2020, 4, 101.0));

    let output = run_pipeline(&rows, &PipelineOptions::new(2025));

    assert!(output.has_errors());
    assert_eq!(output.table.rows_for("Kenya", "Diesel").count(), 0);
    assert_eq!(output.table.rows_for("Kenya", "Jet").count(), 24);
    assert!(output.indices.iter().all(|index| index.key.product == "Jet"));

    let issue = output
        .report
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::DuplicateKey)
        .expect("duplicate issue");
    assert!(issue.message.contains("2020-04"));
    assert_eq!(issue.code, "SQ010");
}

#[test]
fn single_month_group_has_empty_index() {
    let rows = vec![RawObservation::numeric("Fiji", "LPG", 2024, 3, 7.0)];
    let output = run_pipeline(&rows, &PipelineOptions::new(2025));

    assert_eq!(output.table.len(), 1);
    assert_eq!(output.table.rows[0].seasonal_index, None);
    assert!(output.indices.is_empty());
    assert_eq!(output.report.count_of(IssueKind::InsufficientHistory), 1);
    assert!(!output.has_errors());
}

#[test]
fn output_rows_are_ordered_by_pair_then_date() {
    let mut rows = monthly_rows("B", "X", 2021, &[1.0, 2.0]);
    rows.extend(monthly_rows("A", "Y", 2021, &[1.0, 2.0]));
    rows.extend(monthly_rows("A", "X", 2021, &[1.0, 2.0]));
    rows.reverse();

    let output = run_pipeline(&rows, &PipelineOptions::new(2025));
    let order: Vec<String> = output
        .table
        .rows
        .iter()
        .map(|row| format!("{}/{}/{}", row.country, row.product, row.month))
        .collect();
    assert_eq!(
        order,
        vec!["A/X/1", "A/X/2", "A/Y/1", "A/Y/2", "B/X/1", "B/X/2"]
    );
}

#[test]
fn empty_input_produces_empty_output() {
    let output = run_pipeline(&[], &PipelineOptions::new(2025));
    assert!(output.table.is_empty());
    assert!(output.groups.is_empty());
    assert!(output.report.issues.is_empty());
}
