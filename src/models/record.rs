use serde::{Deserialize, Serialize};

use super::measurement::{parse_value, Measurement};

/// Minimum number of fields a data row must carry.
pub const MIN_FIELDS: usize = 5;

/// One data row of the source table, with its consumed columns named.
///
/// Column 0 and anything after column 4 are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandRecord {
    /// 1-based line number in the source text
    pub line: usize,
    pub country: String,
    pub year: String,
    pub measurement: String,
    /// Raw text of the value column
    pub raw_value: String,
    pub value: Option<f64>,
}

impl LandRecord {
    /// Build a record from the split fields of one line.
    ///
    /// Returns `None` when the row has fewer than [`MIN_FIELDS`] fields.
    pub fn from_fields<S: AsRef<str>>(line: usize, fields: &[S]) -> Option<Self> {
        if fields.len() < MIN_FIELDS {
            return None;
        }
        let raw_value = fields[4].as_ref().to_string();
        Some(Self {
            line,
            country: fields[1].as_ref().to_string(),
            year: fields[2].as_ref().to_string(),
            measurement: fields[3].as_ref().to_string(),
            value: parse_value(&raw_value),
            raw_value,
        })
    }

    pub fn to_measurement(&self) -> Measurement {
        Measurement::new(self.measurement.clone(), self.value)
    }
}
