use serde::{Deserialize, Serialize};

/// A named land-use measurement reported for one country in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Measurement name as it appears in the source table
    /// (e.g., "Forest cover (thousand hectares)")
    pub name: String,
    /// Parsed value; `None` when the source text was not a finite number
    pub value: Option<f64>,
}

impl Measurement {
    pub fn new(name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Whether the source text for this measurement parsed to a finite number.
    pub fn is_numeric(&self) -> bool {
        self.value.is_some()
    }
}

/// Parse the textual value column.
///
/// Empty, unparsable and non-finite text (`NaN`, `inf`) all yield `None`.
///
/// # Examples
///
/// ```
/// use land_use_treemap::models::parse_value;
///
/// assert_eq!(parse_value(" 42.5 "), Some(42.5));
/// assert_eq!(parse_value("1e3"), Some(1000.0));
/// assert_eq!(parse_value("n/a"), None);
/// assert_eq!(parse_value(""), None);
/// ```
pub fn parse_value(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
