mod view;
mod extractor;

pub use view::{
    default_views, validate_views, ExtractOptions, KeyOrder, NonNumericPolicy, ViewSpec,
    FOREST_COVER, PRESENCE_INDICATOR,
};
pub use extractor::{extract_view, extract_year, ExtractedView, Extractor};
