use crate::error::ExtractError;
use crate::model::Recipe;
use scraper::Html;

mod html_class;
pub mod json_ld;
mod microdata;
mod registry;
pub mod selectors;
mod site;
pub mod sites;

pub use html_class::HtmlClassExtractor;
pub use json_ld::{extract_structured_recipe, is_recipe_type, sanitize_json, JsonLdExtractor};
pub use microdata::MicroDataExtractor;
pub use registry::Registry;
pub use site::{IncompletePolicy, PageMissing, SiteExtractor, SiteProbes, SiteProfile};

/// A parsed page together with the locator it came from.
pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(content: &str, url: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(content),
        }
    }

    /// Text of the page's `<title>`, or an empty string.
    pub fn page_title(&self) -> String {
        selectors::first_text(&self.document, &[selectors::Probe::Css("title")])
            .unwrap_or_default()
    }
}

/// A recipe extraction strategy.
///
/// `can_handle` must be cheap: it looks at the locator only and never parses
/// or fetches anything.
pub trait Extractor: Send + Sync {
    fn name(&self) -> &str;
    fn can_handle(&self, url: &str) -> bool;
    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ExtractError>;
}
