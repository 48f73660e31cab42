use crate::config::PipelineConfig;
use crate::io::ParsedTable;
use crate::models::{LandMapping, ParseIssue, TreemapDocument};
use crate::views::{self, ExtractOptions, ExtractedView, Extractor, ViewSpec};

/// Shared, read-only server state.
///
/// The mapping is loaded once and never mutated; every request extracts
/// fresh documents from it.
pub struct AppState {
    pub mapping: LandMapping,
    pub issues: Vec<ParseIssue>,
    pub views: Vec<ViewSpec>,
    pub options: ExtractOptions,
    pub strict: bool,
}

impl AppState {
    pub fn new(parsed: ParsedTable, config: &PipelineConfig) -> Self {
        Self {
            mapping: parsed.mapping,
            issues: parsed.issues,
            views: config.views.clone(),
            options: config.extract_options(),
            strict: config.strict,
        }
    }

    pub fn view(&self, label: &str) -> Option<&ViewSpec> {
        self.views.iter().find(|v| v.label == label)
    }

    pub fn extract(&self, view: &ViewSpec) -> ExtractedView {
        Extractor::with_options(&self.mapping, self.options.clone()).extract(view)
    }

    pub fn extract_year(&self, view: &ViewSpec, year: &str) -> Option<TreemapDocument> {
        views::extract_year(&self.mapping, view, year, &self.options)
    }
}
