use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::io::ParsedTable;
use crate::models::{IssueKind, ParseIssue};
use crate::views::ExtractedView;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Format a per-year overview of a parsed table as a string.
pub fn format_table_summary(parsed: &ParsedTable) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Land-Use Table".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table(vec!["Year", "Countries", "Measurements", "Non-numeric"]);
    for (year, countries) in parsed.mapping.iter() {
        let measurements = countries.values().map(Vec::len).sum::<usize>();
        let non_numeric = countries
            .values()
            .flatten()
            .filter(|m| !m.is_numeric())
            .count();
        table.add_row(vec![
            Cell::new(year),
            Cell::new(countries.len()),
            Cell::new(measurements),
            Cell::new(non_numeric),
        ]);
    }
    output.push_str(&format!("{table}\n"));

    let malformed = parsed.issues_of(IssueKind::MalformedRow).count();
    output.push_str(&format!(
        "  Rows read: {}   Years: {}   Skipped rows: {}\n",
        parsed.rows_read,
        parsed.mapping.num_years(),
        malformed
    ));
    output
}

/// Print a per-year overview of a parsed table.
pub fn print_table_summary(parsed: &ParsedTable) {
    print!("{}", format_table_summary(parsed));
}

/// Format up to `limit` parse issues as a string.
pub fn format_issue_table(issues: &[ParseIssue], limit: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Parse Issues".bold().yellow()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    if issues.is_empty() {
        output.push_str("  No issues found.\n");
        return output;
    }

    let mut table = new_table(vec!["Line", "Kind", "Message"]);
    for issue in issues.iter().take(limit) {
        table.add_row(vec![
            Cell::new(issue.line),
            Cell::new(issue.kind.to_string()),
            Cell::new(&issue.message),
        ]);
    }
    output.push_str(&format!("{table}\n"));

    if issues.len() > limit {
        output.push_str(&format!("  ... and {} more\n", issues.len() - limit));
    }
    output
}

/// Print up to `limit` parse issues.
pub fn print_issue_table(issues: &[ParseIssue], limit: usize) {
    print!("{}", format_issue_table(issues, limit));
}

/// Format the per-year documents of a view as a string.
pub fn format_view_summary(extracted: &ExtractedView) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("View '{}': {}", extracted.view.label, extracted.view.measurement)
            .bold()
            .green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table(vec!["Year", "Document", "Countries", "Leaves", "Total"]);
    for (year, doc) in &extracted.documents {
        table.add_row(vec![
            Cell::new(year),
            Cell::new(&doc.name),
            Cell::new(doc.num_countries()),
            Cell::new(doc.num_leaves()),
            Cell::new(format!("{:.1}", doc.total_value())),
        ]);
    }

    output.push_str(&format!("{table}"));
    output.push('\n');
    output
}

/// Print the per-year documents of a view.
pub fn print_view_summary(extracted: &ExtractedView) {
    print!("{}", format_view_summary(extracted));
}
