pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod views;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use config::PipelineConfig;
pub use error::LandError;
pub use io::{MappingReader, MappingWriter, ParsedTable};
pub use models::{LandMapping, Measurement, TreemapDocument};
pub use views::{extract_view, Extractor, ViewSpec};
