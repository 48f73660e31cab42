use indexmap::IndexMap;
use serde::Serialize;

use crate::models::{
    leaf_name, CountryMeasurements, CountryNode, LandMapping, LeafNode, Measurement,
    TreemapDocument,
};

use super::view::{ExtractOptions, ViewSpec};

/// Build the country node for one view, or `None` when the country does not
/// report the presence indicator.
///
/// A country that reports the indicator but not the target measurement still
/// gets an (empty) node.
fn country_node(
    country: &str,
    measurements: &[Measurement],
    target: &str,
    options: &ExtractOptions,
) -> Option<CountryNode> {
    if !measurements
        .iter()
        .any(|m| m.name == options.presence_indicator)
    {
        return None;
    }

    let children = measurements
        .iter()
        .filter(|m| m.name == target)
        .filter_map(|m| {
            options.non_numeric.resolve(m.value).map(|value| LeafNode {
                name: leaf_name(country, &m.name),
                value,
            })
        })
        .collect();

    Some(CountryNode {
        name: country.to_string(),
        children,
    })
}

/// Extract one treemap document per year for `view`.
///
/// The mapping is only read; leaves are fresh copies, so extracting the same
/// view twice yields identical documents.
///
/// # Examples
///
/// ```
/// use land_use_treemap::io::parse_table;
/// use land_use_treemap::views::{extract_view, ExtractOptions, ViewSpec};
///
/// let csv = "id,country,year,series,value\n\
///     H,France,2000,Forest cover (thousand hectares),100\n\
///     H,France,2000,Land area (thousand hectares),500\n\
///     H,Spain,2000,Forest cover (thousand hectares),50";
/// let parsed = parse_table(csv).unwrap();
/// let view = ViewSpec::new("forest", "Forest cover (thousand hectares)");
///
/// let docs = extract_view(&parsed.mapping, &view, &ExtractOptions::default());
/// let doc = &docs["2000"];
/// assert_eq!(doc.name, "Land_forest_2000");
/// assert_eq!(doc.children.len(), 1);
/// assert_eq!(doc.children[0].children[0].name, "France - Forest cover (thousand hectares)");
/// ```
pub fn extract_view(
    mapping: &LandMapping,
    view: &ViewSpec,
    options: &ExtractOptions,
) -> IndexMap<String, TreemapDocument> {
    let mut documents = IndexMap::with_capacity(mapping.num_years());

    for year in options.year_order.arrange(mapping.years()) {
        let Some(countries) = mapping.year(year) else {
            continue;
        };
        documents.insert(year.to_string(), build_document(year, countries, view, options));
    }

    documents
}

/// Extract the document of a single year, or `None` when the mapping has no
/// such year.
pub fn extract_year(
    mapping: &LandMapping,
    view: &ViewSpec,
    year: &str,
    options: &ExtractOptions,
) -> Option<TreemapDocument> {
    mapping
        .year(year)
        .map(|countries| build_document(year, countries, view, options))
}

fn build_document(
    year: &str,
    countries: &CountryMeasurements,
    view: &ViewSpec,
    options: &ExtractOptions,
) -> TreemapDocument {
    let mut root = TreemapDocument::new(format!(
        "{}_{}_{}",
        options.document_prefix, view.label, year
    ));

    for country in options
        .country_order
        .arrange(countries.keys().map(String::as_str))
    {
        let node = countries
            .get(country)
            .and_then(|m| country_node(country, m, &view.measurement, options));
        if let Some(node) = node {
            root.children.push(node);
        }
    }

    tracing::debug!(
        view = %view.label,
        year,
        countries = root.num_countries(),
        leaves = root.num_leaves(),
        "extracted view document"
    );
    root
}

/// All per-year documents of one view.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedView {
    pub view: ViewSpec,
    /// Documents keyed by year
    pub documents: IndexMap<String, TreemapDocument>,
}

impl ExtractedView {
    pub fn extract(mapping: &LandMapping, view: &ViewSpec, options: &ExtractOptions) -> Self {
        Self {
            view: view.clone(),
            documents: extract_view(mapping, view, options),
        }
    }

    pub fn document(&self, year: &str) -> Option<&TreemapDocument> {
        self.documents.get(year)
    }

    pub fn num_documents(&self) -> usize {
        self.documents.len()
    }
}

/// Unified extraction API over one immutable mapping.
pub struct Extractor<'a> {
    mapping: &'a LandMapping,
    options: ExtractOptions,
}

impl<'a> Extractor<'a> {
    /// Create an extractor with default options.
    pub fn new(mapping: &'a LandMapping) -> Self {
        Self::with_options(mapping, ExtractOptions::default())
    }

    pub fn with_options(mapping: &'a LandMapping, options: ExtractOptions) -> Self {
        Self { mapping, options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract one view.
    pub fn extract(&self, view: &ViewSpec) -> ExtractedView {
        ExtractedView::extract(self.mapping, view, &self.options)
    }

    /// Extract one year of one view.
    pub fn extract_year(&self, view: &ViewSpec, year: &str) -> Option<TreemapDocument> {
        extract_year(self.mapping, view, year, &self.options)
    }

    /// Extract every view, in the given order.
    pub fn extract_all(&self, views: &[ViewSpec]) -> Vec<ExtractedView> {
        views.iter().map(|v| self.extract(v)).collect()
    }
}
