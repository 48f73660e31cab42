use serde::{Deserialize, Serialize};

use crate::error::LandError;

/// Measurement whose presence gates a country's inclusion in every view.
pub const PRESENCE_INDICATOR: &str = "Land area (thousand hectares)";

/// Forest cover measurement used by the `forest` view.
pub const FOREST_COVER: &str = "Forest cover (thousand hectares)";

/// A named derived view focused on one measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Short label used in document and file names (e.g., "forest")
    pub label: String,
    /// Measurement name whose rows become leaves
    pub measurement: String,
}

impl ViewSpec {
    pub fn new(label: impl Into<String>, measurement: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            measurement: measurement.into(),
        }
    }

    pub fn validate(&self) -> Result<(), LandError> {
        if self.label.trim().is_empty() {
            return Err(LandError::InvalidView("view label must not be empty".to_string()));
        }
        if self.label.contains(['/', '\\']) {
            return Err(LandError::InvalidView(format!(
                "view label '{}' must not contain path separators",
                self.label
            )));
        }
        if self.measurement.trim().is_empty() {
            return Err(LandError::InvalidView(format!(
                "view '{}' has no measurement",
                self.label
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for ViewSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.label, self.measurement)
    }
}

impl std::str::FromStr for ViewSpec {
    type Err = LandError;

    /// Parse `label=measurement`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, measurement) = s.split_once('=').ok_or_else(|| {
            LandError::InvalidView(format!("expected 'label=measurement', got '{s}'"))
        })?;
        let view = ViewSpec::new(label.trim(), measurement.trim());
        view.validate()?;
        Ok(view)
    }
}

/// The views produced by the land-use pipeline out of the box.
pub fn default_views() -> Vec<ViewSpec> {
    vec![
        ViewSpec::new("forest", FOREST_COVER),
        ViewSpec::new("all_area", PRESENCE_INDICATOR),
    ]
}

/// Ensure every view is well formed and labels are unique.
pub fn validate_views(views: &[ViewSpec]) -> Result<(), LandError> {
    for (i, view) in views.iter().enumerate() {
        view.validate()?;
        if views[..i].iter().any(|v| v.label == view.label) {
            return Err(LandError::InvalidView(format!(
                "duplicate view label '{}'",
                view.label
            )));
        }
    }
    Ok(())
}

/// Order in which years or countries are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrder {
    /// First-seen order in the source table
    #[default]
    Insertion,
    /// Integer keys first in numeric order, then the rest lexicographically
    Sorted,
}

impl KeyOrder {
    pub fn arrange<'a, I>(self, keys: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut keys: Vec<&str> = keys.into_iter().collect();
        if self == KeyOrder::Sorted {
            keys.sort_by(|a, b| compare_keys(a, b));
        }
        keys
    }
}

fn compare_keys(a: &str, b: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

impl std::str::FromStr for KeyOrder {
    type Err = LandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insertion" | "input" => Ok(KeyOrder::Insertion),
            "sorted" | "sort" => Ok(KeyOrder::Sorted),
            _ => Err(LandError::ParseError(format!("Unknown key order: '{s}'"))),
        }
    }
}

/// How leaves with a missing (non-numeric) value are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonNumericPolicy {
    /// Drop the leaf
    #[default]
    Exclude,
    /// Keep the leaf with a value of 0
    Zero,
}

impl NonNumericPolicy {
    pub fn resolve(self, value: Option<f64>) -> Option<f64> {
        match (value, self) {
            (Some(v), _) => Some(v),
            (None, NonNumericPolicy::Exclude) => None,
            (None, NonNumericPolicy::Zero) => Some(0.0),
        }
    }
}

impl std::str::FromStr for NonNumericPolicy {
    type Err = LandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclude" | "skip" => Ok(NonNumericPolicy::Exclude),
            "zero" | "0" => Ok(NonNumericPolicy::Zero),
            _ => Err(LandError::ParseError(format!(
                "Unknown non-numeric policy: '{s}'"
            ))),
        }
    }
}

/// Knobs shared by every view extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Measurement a country must report to appear in any view
    pub presence_indicator: String,
    /// Prefix of root document names (`"<prefix>_<view>_<year>"`)
    pub document_prefix: String,
    pub non_numeric: NonNumericPolicy,
    pub year_order: KeyOrder,
    pub country_order: KeyOrder,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            presence_indicator: PRESENCE_INDICATOR.to_string(),
            document_prefix: "Land".to_string(),
            non_numeric: NonNumericPolicy::Exclude,
            year_order: KeyOrder::Sorted,
            country_order: KeyOrder::Insertion,
        }
    }
}
