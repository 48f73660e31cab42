use serde::{Deserialize, Serialize};

/// A treemap leaf: one measurement of one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    /// `"<country> - <measurement name>"`
    pub name: String,
    pub value: f64,
}

/// A country grouping the leaves of one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryNode {
    pub name: String,
    pub children: Vec<LeafNode>,
}

impl CountryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Sum of this country's leaf values.
    pub fn total_value(&self) -> f64 {
        self.children.iter().map(|l| l.value).sum()
    }
}

/// Root of a per-year treemap document (e.g., `"Land_forest_2000"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapDocument {
    pub name: String,
    pub children: Vec<CountryNode>,
}

impl TreemapDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn num_countries(&self) -> usize {
        self.children.len()
    }

    pub fn num_leaves(&self) -> usize {
        self.children.iter().map(|c| c.children.len()).sum()
    }

    pub fn total_value(&self) -> f64 {
        self.children.iter().map(CountryNode::total_value).sum()
    }

    pub fn country(&self, name: &str) -> Option<&CountryNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &LeafNode> {
        self.children.iter().flat_map(|c| c.children.iter())
    }
}

/// Name a leaf after its owning country.
pub fn leaf_name(country: &str, measurement: &str) -> String {
    format!("{country} - {measurement}")
}
