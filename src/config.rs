use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LandError;
use crate::views::{
    default_views, validate_views, ExtractOptions, KeyOrder, NonNumericPolicy, ViewSpec,
    PRESENCE_INDICATOR,
};

/// Pipeline settings, loadable from a TOML file.
///
/// Every key is optional:
///
/// ```toml
/// output_prefix = "land"
/// document_prefix = "Land"
/// presence_indicator = "Land area (thousand hectares)"
/// strict = false
/// pretty = false
/// non_numeric = "exclude"   # or "zero"
/// year_order = "sorted"     # or "insertion"
/// country_order = "insertion"
///
/// [[views]]
/// label = "forest"
/// measurement = "Forest cover (thousand hectares)"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Prefix of output file names (`<prefix>_<view>_<year>.json`) and of the
    /// intermediate mapping file (`<prefix>.json`)
    pub output_prefix: String,
    pub document_prefix: String,
    pub presence_indicator: String,
    pub strict: bool,
    pub pretty: bool,
    pub non_numeric: NonNumericPolicy,
    pub year_order: KeyOrder,
    pub country_order: KeyOrder,
    pub views: Vec<ViewSpec>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let options = ExtractOptions::default();
        Self {
            output_prefix: "land".to_string(),
            document_prefix: options.document_prefix,
            presence_indicator: PRESENCE_INDICATOR.to_string(),
            strict: false,
            pretty: false,
            non_numeric: options.non_numeric,
            year_order: options.year_order,
            country_order: options.country_order,
            views: default_views(),
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, LandError> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LandError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, LandError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), LandError> {
        if self.presence_indicator.trim().is_empty() {
            return Err(LandError::InvalidView(
                "presence_indicator must not be empty".to_string(),
            ));
        }
        if self.output_prefix.contains(['/', '\\']) {
            return Err(LandError::ParseError(format!(
                "output_prefix '{}' must not contain path separators",
                self.output_prefix
            )));
        }
        validate_views(&self.views)
    }

    /// Extraction options derived from this configuration.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            presence_indicator: self.presence_indicator.clone(),
            document_prefix: self.document_prefix.clone(),
            non_numeric: self.non_numeric,
            year_order: self.year_order,
            country_order: self.country_order,
        }
    }

    /// File name of the intermediate mapping artifact.
    pub fn mapping_file_name(&self) -> String {
        format!("{}.json", self.output_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.views.len(), 2);
        assert_eq!(config.mapping_file_name(), "land.json");
    }

    #[test]
    fn test_full_toml() {
        let content = r#"
            output_prefix = "un"
            document_prefix = "UN"
            strict = true
            pretty = true
            non_numeric = "zero"
            year_order = "insertion"
            country_order = "sorted"

            [[views]]
            label = "arable"
            measurement = "Arable land (thousand hectares)"
        "#;
        let config = PipelineConfig::from_toml_str(content).unwrap();
        assert_eq!(config.output_prefix, "un");
        assert!(config.strict);
        assert!(config.pretty);
        assert_eq!(config.views, vec![ViewSpec::new("arable", "Arable land (thousand hectares)")]);

        let opts = config.extract_options();
        assert_eq!(opts.document_prefix, "UN");
        assert_eq!(opts.non_numeric, NonNumericPolicy::Zero);
        assert_eq!(opts.year_order, KeyOrder::Insertion);
        assert_eq!(opts.country_order, KeyOrder::Sorted);
        assert_eq!(opts.presence_indicator, PRESENCE_INDICATOR);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PipelineConfig::from_toml_str("colour = \"green\"").unwrap_err();
        assert!(matches!(err, LandError::Config(_)));
    }

    #[test]
    fn test_bad_enum_value_rejected() {
        let err = PipelineConfig::from_toml_str("non_numeric = \"nan\"").unwrap_err();
        assert!(matches!(err, LandError::Config(_)));
    }

    #[test]
    fn test_duplicate_views_rejected() {
        let content = r#"
            [[views]]
            label = "forest"
            measurement = "A"

            [[views]]
            label = "forest"
            measurement = "B"
        "#;
        let err = PipelineConfig::from_toml_str(content).unwrap_err();
        assert!(matches!(err, LandError::InvalidView(_)));
    }

    #[test]
    fn test_output_prefix_with_separator_rejected() {
        let err = PipelineConfig::from_toml_str("output_prefix = \"../land\"").unwrap_err();
        assert!(matches!(err, LandError::ParseError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.toml");
        std::fs::write(&path, "pretty = true\n").unwrap();

        let config = PipelineConfig::load_or_default(Some(&path)).unwrap();
        assert!(config.pretty);
        assert_eq!(PipelineConfig::load_or_default(None).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = PipelineConfig::load("no/such/pipeline.toml").unwrap_err();
        assert!(matches!(err, LandError::Io(_)));
    }
}
