mod measurement;
mod record;
mod mapping;
mod document;
mod issue;

pub use measurement::{parse_value, Measurement};
pub use record::{LandRecord, MIN_FIELDS};
pub use mapping::{CountryMeasurements, LandMapping};
pub use document::{leaf_name, CountryNode, LeafNode, TreemapDocument};
pub use issue::{IssueKind, ParseIssue};
