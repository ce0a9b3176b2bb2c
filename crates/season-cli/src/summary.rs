use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use season_cli::types::RunResult;
use season_model::{GroupStatus, GroupSummary, IssueSeverity, QualityIssue};

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.source);
    println!(
        "Retention: {} onward (current year {}, lookback {})",
        result.options.first_retained_year(),
        result.options.current_year,
        result.options.lookback_years
    );
    match &result.outputs.table {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    if let Some(path) = &result.outputs.index {
        println!("Index table: {}", path.display());
    }
    if let Some(path) = &result.outputs.report {
        println!("Quality report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Country"),
        header_cell("Product"),
        header_cell("Rows"),
        header_cell("Interpolated"),
        header_cell("Ratios"),
        header_cell("Months"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table, 140);
    for column in 2..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);

    let mut total_rows = 0usize;
    let mut total_interpolated = 0usize;
    let mut total_ratios = 0usize;
    for group in &result.groups {
        total_rows += group.rows();
        total_interpolated += group.interpolated;
        total_ratios += group.retained_ratios;
        table.add_row(group_row(group));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} pairs", result.groups.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(total_interpolated).add_attribute(Attribute::Bold),
        Cell::new(total_ratios).add_attribute(Attribute::Bold),
        Cell::new(result.index_cells).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_issue_table(&result.report.issues);
}

fn group_row(group: &GroupSummary) -> Vec<Cell> {
    vec![
        Cell::new(&group.key.country)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(&group.key.product),
        Cell::new(group.rows()),
        count_cell(group.interpolated, Color::Yellow),
        Cell::new(group.retained_ratios),
        Cell::new(format!("{}/12", group.index_months)),
        status_cell(group.status),
    ]
}

fn print_issue_table(issues: &[QualityIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut ordered: Vec<&QualityIssue> = issues.iter().collect();
    ordered.sort_by(|a, b| {
        let severity = severity_rank(b.severity).cmp(&severity_rank(a.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        (&a.country, &a.product, &a.code).cmp(&(&b.country, &b.product, &b.code))
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Country"),
        header_cell("Product"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table, 180);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for issue in ordered {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            label_cell(issue.country.as_deref()),
            label_cell(issue.product.as_deref()),
            match issue.count {
                Some(value) => Cell::new(value).fg(severity_color(issue.severity)),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: GroupStatus) -> Cell {
    match status {
        GroupStatus::Complete => Cell::new("complete").fg(Color::Green),
        GroupStatus::Partial => Cell::new("partial").fg(Color::Yellow),
        GroupStatus::NoIndex => Cell::new("no index").fg(Color::Yellow),
        GroupStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn label_cell(label: Option<&str>) -> Cell {
    match label {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
    }
}

fn severity_color(severity: IssueSeverity) -> Color {
    match severity {
        IssueSeverity::Error => Color::Red,
        IssueSeverity::Warning => Color::Yellow,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
