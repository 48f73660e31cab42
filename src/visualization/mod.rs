mod tables;
mod charts;

pub use tables::{
    format_table_summary, print_table_summary,
    format_issue_table, print_issue_table,
    format_view_summary, print_view_summary,
};
pub use charts::{format_country_chart, print_country_chart};
