use colored::Colorize;

use crate::models::TreemapDocument;

/// Format a text bar chart of the `top` heaviest countries in a document.
///
/// Bars are proportional to each country's summed leaf values, which is the
/// weight a treemap layout would give the country's rectangle.
pub fn format_country_chart(doc: &TreemapDocument, top: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", doc.name.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut totals: Vec<(&str, f64)> = doc
        .children
        .iter()
        .map(|c| (c.name.as_str(), c.total_value()))
        .filter(|(_, total)| *total > 0.0)
        .collect();

    if totals.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    let max_total = totals[0].1;
    let bar_width = 40;

    for (country, total) in totals.iter().take(top) {
        let bar_len = ((total / max_total) * bar_width as f64).round() as usize;
        let bar = "\u{2588}".repeat(bar_len);
        output.push_str(&format!("  {:<24.24}  {:>12.1}  {}\n", country, total, bar.green()));
    }

    if totals.len() > top {
        output.push_str(&format!("  ... {} more countries\n", totals.len() - top));
    }

    output.push('\n');
    output
}

/// Print a text bar chart of the heaviest countries in a document.
pub fn print_country_chart(doc: &TreemapDocument, top: usize) {
    print!("{}", format_country_chart(doc, top));
}
