use crate::diagnostics::DiagnosticBundle;
use crate::model::Recipe;
use crate::validation::ValidationResult;
use thiserror::Error;

/// Why a single extractor could not produce a recipe.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The publisher served its "page not found" page
    #[error("{site}: page not found at {url}")]
    PageNotFound { site: &'static str, url: String },

    /// The extractor found a recipe but it failed validation
    #[error("{}: extracted recipe is incomplete ({})", .site, .validation.summary())]
    Incomplete {
        site: &'static str,
        validation: ValidationResult,
    },

    /// No structured recipe metadata on the page
    #[error("No recipe found in the page's structured metadata")]
    NoStructuredData,

    /// Recipe content could not be located
    #[error("Could not extract recipe content: {0}")]
    NoContent(String),
}

/// Typed outcome of a failed extraction, naming the stage that failed.
///
/// Every variant can carry a [`DiagnosticBundle`] describing the page.
#[derive(Error, Debug)]
pub enum ExtractionFailure {
    /// Nothing at all could be extracted from the page
    #[error("No extractor could find a recipe at {url}")]
    NoMatchingStrategy {
        url: String,
        diagnostics: Option<Box<DiagnosticBundle>>,
    },

    /// The publisher extractor failed and no fallback produced a valid recipe
    #[error("Extractor '{strategy}' failed: {source}")]
    StrategyThrew {
        strategy: String,
        source: ExtractError,
        diagnostics: Option<Box<DiagnosticBundle>>,
    },

    /// A recipe was extracted but is incomplete or invalid
    #[error("Extracted recipe failed validation ({})", .validation.summary())]
    ValidationFailed {
        recipe: Box<Recipe>,
        validation: ValidationResult,
        diagnostics: Option<Box<DiagnosticBundle>>,
    },
}

impl ExtractionFailure {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::NoMatchingStrategy { .. } => "NoMatchingStrategy",
            Self::StrategyThrew { .. } => "StrategyThrew",
            Self::ValidationFailed { .. } => "ValidationFailed",
        }
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            Self::ValidationFailed { validation, .. } => Some(validation),
            Self::StrategyThrew {
                source: ExtractError::Incomplete { validation, .. },
                ..
            } => Some(validation),
            _ => None,
        }
    }

    /// The best partial record produced before the failure, if any.
    pub fn partial_recipe(&self) -> Option<&Recipe> {
        match self {
            Self::ValidationFailed { recipe, .. } => Some(recipe),
            _ => None,
        }
    }

    pub fn diagnostics(&self) -> Option<&DiagnosticBundle> {
        match self {
            Self::NoMatchingStrategy { diagnostics, .. }
            | Self::StrategyThrew { diagnostics, .. }
            | Self::ValidationFailed { diagnostics, .. } => diagnostics.as_deref(),
        }
    }

    pub fn with_diagnostics(mut self, bundle: DiagnosticBundle) -> Self {
        match &mut self {
            Self::NoMatchingStrategy { diagnostics, .. }
            | Self::StrategyThrew { diagnostics, .. }
            | Self::ValidationFailed { diagnostics, .. } => {
                *diagnostics = Some(Box::new(bundle));
            }
        }
        self
    }
}

/// Errors raised by the host side: fetching pages, reading files, loading config.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch the page
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Failed to read a page from disk
    #[error("Failed to read page: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// The page was fetched but extraction failed
    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),
}
