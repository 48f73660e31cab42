use thiserror::Error;

/// Errors that can occur while restructuring land-use data.
#[derive(Error, Debug)]
pub enum LandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Malformed record on line {line}: expected at least 5 fields, found {found}")]
    MalformedRow { line: usize, found: usize },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid view: {0}")]
    InvalidView(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
