use std::borrow::Cow;
use std::path::Path;

use serde::Serialize;

use crate::error::LandError;
use crate::models::{IssueKind, LandMapping, LandRecord, ParseIssue};

/// Result of parsing a land-use table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedTable {
    pub mapping: LandMapping,
    /// Rows skipped or kept with a missing value
    pub issues: Vec<ParseIssue>,
    /// Number of data rows that made it into the mapping
    pub rows_read: usize,
    /// Number of newline-separated lines, header included
    pub line_count: usize,
}

impl ParsedTable {
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &ParseIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }
}

fn line_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .trim(csv::Trim::All);
    builder
}

/// Drop blanks between a delimiter and an opening quote, so `a, "b,c"` reads
/// as a quoted field rather than two fragments.
fn strip_quote_padding(line: &str) -> Cow<'_, str> {
    if !line.contains('"') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut in_quotes = false;
    let mut field_start = true;
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if field_start {
            field_start = false;
            let unpadded = rest.trim_start_matches([' ', '\t']);
            if unpadded.starts_with('"') {
                rest = &unpadded[1..];
                out.push('"');
                in_quotes = true;
                continue;
            }
        }

        rest = &rest[c.len_utf8()..];
        match c {
            '"' if in_quotes => {
                if rest.starts_with('"') {
                    out.push('"');
                    rest = &rest[1..];
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => field_start = true,
            _ => {}
        }
        out.push(c);
    }

    Cow::Owned(out)
}

fn split_with(builder: &csv::ReaderBuilder, line: &str) -> Result<Vec<String>, LandError> {
    let line = strip_quote_padding(line);
    let mut rdr = builder.from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    if !rdr.read_record(&mut record)? {
        return Ok(Vec::new());
    }
    Ok(record.iter().map(str::to_string).collect())
}

/// Split one line into fields.
///
/// Fields are comma separated; a field wrapped in double quotes may contain
/// commas, and its quotes and surrounding whitespace (inside or outside the
/// quotes) are stripped. A line starting with a comma yields an empty first
/// field. An unterminated quote runs to the end of the line. Only `\n` ends a
/// record, so a stray `\r` stays part of its field.
///
/// # Examples
///
/// ```
/// use land_use_treemap::io::split_fields;
///
/// let fields = split_fields(r#",Bolivia,"Plurinational State of, Bolivia",2000"#).unwrap();
/// assert_eq!(fields, vec!["", "Bolivia", "Plurinational State of, Bolivia", "2000"]);
/// ```
pub fn split_fields(line: &str) -> Result<Vec<String>, LandError> {
    split_with(&line_reader(), line)
}

fn parse_lines(text: &str, strict: bool) -> Result<ParsedTable, LandError> {
    let builder = line_reader();
    let mut table = ParsedTable {
        line_count: text.split('\n').count(),
        ..ParsedTable::default()
    };
    tracing::debug!(lines = table.line_count, "parsing land-use table");

    // Line 0 is the header.
    for (index, line) in text.split('\n').enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let fields = split_with(&builder, line)?;

        let Some(record) = LandRecord::from_fields(line_no, &fields) else {
            if strict {
                return Err(LandError::MalformedRow {
                    line: line_no,
                    found: fields.len(),
                });
            }
            tracing::warn!(line = line_no, found = fields.len(), "skipping malformed row");
            table.issues.push(ParseIssue {
                line: line_no,
                kind: IssueKind::MalformedRow,
                message: format!("Expected at least 5 fields, found {}", fields.len()),
            });
            continue;
        };

        if record.value.is_none() {
            table.issues.push(ParseIssue {
                line: line_no,
                kind: IssueKind::NonNumericValue,
                message: format!(
                    "Value '{}' for '{}' ({}, {}) is not a number",
                    record.raw_value, record.measurement, record.country, record.year
                ),
            });
        }

        table.mapping.insert(&record);
        table.rows_read += 1;
    }

    tracing::info!(
        rows = table.rows_read,
        years = table.mapping.num_years(),
        issues = table.issues.len(),
        "parsed land-use table"
    );
    Ok(table)
}

/// Parse a land-use table, skipping malformed rows and recording them as issues.
pub fn parse_table(text: &str) -> Result<ParsedTable, LandError> {
    parse_lines(text, false)
}

/// Parse a land-use table, failing on the first malformed row.
///
/// Non-numeric values are still recorded as issues rather than failures.
pub fn parse_table_strict(text: &str) -> Result<ParsedTable, LandError> {
    parse_lines(text, true)
}

/// Read and parse a land-use table from a file.
pub fn read_table(path: impl AsRef<Path>, strict: bool) -> Result<ParsedTable, LandError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_lines(&text, strict)
}

/// Parse a land-use table from raw bytes (e.g., an HTTP request body).
pub fn parse_table_from_bytes(data: &[u8], strict: bool) -> Result<ParsedTable, LandError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| LandError::ParseError(format!("Invalid UTF-8: {e}")))?;
    parse_lines(text, strict)
}
