mod csv_io;
mod json_io;

use std::path::Path;

use crate::error::LandError;
use crate::models::LandMapping;

pub use csv_io::{
    parse_table, parse_table_from_bytes, parse_table_strict, read_table, split_fields, ParsedTable,
};
pub use json_io::{
    document_file_name, read_mapping_json, read_mapping_json_from_bytes, write_mapping_json,
    write_view_documents,
};

/// Trait for reading a normalized land-use mapping from a file.
pub trait MappingReader {
    fn read(&self, path: &Path) -> Result<LandMapping, LandError>;
}

/// Trait for writing a normalized land-use mapping to a file.
pub trait MappingWriter {
    fn write(&self, mapping: &LandMapping, path: &Path) -> Result<(), LandError>;
}

/// Delimited land-use table reader.
#[derive(Default)]
pub struct CsvFormat {
    pub strict: bool,
}

impl MappingReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<LandMapping, LandError> {
        Ok(read_table(path, self.strict)?.mapping)
    }
}

/// Intermediate JSON mapping reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl MappingReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<LandMapping, LandError> {
        read_mapping_json(path)
    }
}

impl MappingWriter for JsonFormat {
    fn write(&self, mapping: &LandMapping, path: &Path) -> Result<(), LandError> {
        write_mapping_json(mapping, path, self.pretty)
    }
}

/// Load a parsed table from either a `.csv` table or an intermediate `.json` mapping.
///
/// JSON input carries no parse issues and reports every measurement as read.
pub fn load_table(path: &Path, strict: bool) -> Result<ParsedTable, LandError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "json" => {
            let mapping = read_mapping_json(path)?;
            Ok(ParsedTable {
                rows_read: mapping.num_measurements(),
                mapping,
                ..ParsedTable::default()
            })
        }
        _ => read_table(path, strict),
    }
}
