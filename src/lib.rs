//! Recipe extraction and failure diagnostics for food-publisher pages.
//!
//! Hand the engine a page's markup and the URL it came from. It returns a
//! validated [`Recipe`] or an [`ExtractionFailure`] that names the failing
//! stage and, unless disabled, carries a [`DiagnosticBundle`] describing the
//! page.
//!
//! ```
//! use recipe_extract::extract_recipe;
//!
//! let html = r#"<script type="application/ld+json">
//!     {"@type": "Recipe", "name": "Toast",
//!      "recipeIngredient": ["1 slice bread"], "recipeInstructions": ["Toast it."]}
//! </script>"#;
//!
//! let recipe = extract_recipe(html, "https://example.com/toast").unwrap();
//! assert_eq!(recipe.title, "Toast");
//! assert_eq!(recipe.instructions[0].step_number, 1);
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod validation;

use log::{info, warn};

pub use config::EngineConfig;
pub use diagnostics::DiagnosticBundle;
pub use error::{ExtractError, ExtractionFailure, ImportError};
pub use extractors::{Extractor, Registry};
pub use model::{Ingredient, Instruction, Recipe};
pub use normalize::normalize;
pub use validation::{validate, ValidationResult};

use crate::config::DiagnosticsConfig;
use crate::fetch::RequestFetcher;

/// The strategy registry plus the diagnostics settings applied on failure.
pub struct RecipeEngine {
    registry: Registry,
    diagnostics: DiagnosticsConfig,
}

impl Default for RecipeEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl RecipeEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            registry: Registry::from_config(&config.extractors),
            diagnostics: config.diagnostics.clone(),
        }
    }

    /// Uses a caller-built registry, e.g. one with extra strategies registered.
    pub fn with_registry(registry: Registry, diagnostics: DiagnosticsConfig) -> Self {
        Self {
            registry,
            diagnostics,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Extracts a validated recipe from `content`.
    ///
    /// On failure the diagnostics profiler runs over the same content and its
    /// bundle is attached to the returned failure, unless diagnostics are
    /// disabled in the configuration.
    pub fn extract(&self, content: &str, url: &str) -> Result<Recipe, ExtractionFailure> {
        match self.registry.run(content, url) {
            Ok(extraction) => {
                info!("Extracted '{}' with {}", extraction.recipe.title, extraction.strategy);
                Ok(extraction.recipe)
            }
            Err(failure) => {
                warn!("Extraction failed for {}: {}", url, failure);
                if self.diagnostics.enabled {
                    Err(failure.with_diagnostics(self.capture_diagnostics(content, url)))
                } else {
                    Err(failure)
                }
            }
        }
    }

    /// Profiles `content` regardless of whether extraction would succeed.
    pub fn capture_diagnostics(&self, content: &str, url: &str) -> DiagnosticBundle {
        diagnostics::capture(&self.registry, &self.diagnostics, content, url)
    }
}

/// Extracts a recipe with the default configuration.
pub fn extract_recipe(content: &str, url: &str) -> Result<Recipe, ExtractionFailure> {
    RecipeEngine::default().extract(content, url)
}

/// Builds a diagnostic bundle with the default configuration.
pub fn capture_diagnostics(content: &str, url: &str) -> DiagnosticBundle {
    RecipeEngine::default().capture_diagnostics(content, url)
}

/// Fetches `url` and extracts a recipe from the response, using defaults.
pub async fn fetch_recipe(url: &str) -> Result<Recipe, ImportError> {
    fetch_recipe_with_config(url, &EngineConfig::default()).await
}

/// Fetches `url` with the configured client and extracts a recipe from it.
pub async fn fetch_recipe_with_config(
    url: &str,
    config: &EngineConfig,
) -> Result<Recipe, ImportError> {
    let fetcher = RequestFetcher::new(&config.fetch)?;
    let content = fetcher.fetch(url).await?;
    let recipe = RecipeEngine::new(config).extract(&content, url)?;
    Ok(recipe)
}
