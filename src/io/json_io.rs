use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::LandError;
use crate::models::LandMapping;
use crate::views::ExtractedView;

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, LandError> {
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(content)
}

/// Read the intermediate year -> country -> measurements mapping.
pub fn read_mapping_json(path: impl AsRef<Path>) -> Result<LandMapping, LandError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let mapping: LandMapping = serde_json::from_str(&content)?;
    Ok(mapping)
}

/// Read the intermediate mapping from JSON bytes.
pub fn read_mapping_json_from_bytes(data: &[u8]) -> Result<LandMapping, LandError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| LandError::ParseError(format!("Invalid UTF-8: {e}")))?;
    Ok(serde_json::from_str(content)?)
}

/// Write the intermediate mapping as JSON.
pub fn write_mapping_json(
    mapping: &LandMapping,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), LandError> {
    std::fs::write(path.as_ref(), to_json(mapping, pretty)?)?;
    Ok(())
}

/// Replace characters that cannot appear in a single path component.
fn file_component(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// File name for one (view, year) document: `<prefix>_<view>_<year>.json`.
///
/// Year keys come straight from the input table, so path separators and
/// control characters in them are replaced with `_`. The file always lands
/// directly in the output directory.
///
/// # Examples
///
/// ```
/// use land_use_treemap::io::document_file_name;
///
/// assert_eq!(document_file_name("land", "forest", "2000"), "land_forest_2000.json");
/// ```
pub fn document_file_name(output_prefix: &str, view_label: &str, year: &str) -> String {
    format!(
        "{output_prefix}_{view_label}_{}.json",
        file_component(year)
    )
}

/// Write every per-year document of a view into `dir`, returning the written paths.
pub fn write_view_documents(
    extracted: &ExtractedView,
    dir: impl AsRef<Path>,
    output_prefix: &str,
    pretty: bool,
) -> Result<Vec<PathBuf>, LandError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(extracted.documents.len());
    for (year, document) in &extracted.documents {
        let path = dir.join(document_file_name(output_prefix, &extracted.view.label, year));
        std::fs::write(&path, to_json(document, pretty)?)?;
        tracing::info!(path = %path.display(), countries = document.num_countries(), "{year} data saved");
        written.push(path);
    }
    Ok(written)
}
