use super::{
    sites, Extractor, HtmlClassExtractor, JsonLdExtractor, MicroDataExtractor, ParsingContext,
};
use crate::config::ExtractorsConfig;
use crate::error::{ExtractError, ExtractionFailure};
use crate::model::Recipe;
use crate::validation::validate;
use log::{debug, info, warn};

/// A validated recipe and the name of the strategy that produced it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub recipe: Recipe,
    pub strategy: String,
}

/// Ordered strategies plus the fallback chain behind them.
///
/// Resolution is by registration order: the first strategy whose
/// `can_handle` accepts the locator is used. When it fails, the universal
/// structured-metadata passes (JSON-LD, then microdata) run over the same
/// page. Locators no strategy matches go straight to the universal passes
/// and then to the generic heuristic pass.
pub struct Registry {
    strategies: Vec<Box<dyn Extractor>>,
    universal: Vec<Box<dyn Extractor>>,
    generic: Option<Box<dyn Extractor>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_default_sites()
    }
}

impl Registry {
    /// An empty registry that still runs the universal and generic passes.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            universal: vec![Box::new(JsonLdExtractor), Box::new(MicroDataExtractor)],
            generic: Some(Box::new(HtmlClassExtractor)),
        }
    }

    /// Every built-in publisher strategy, in the documented order.
    pub fn with_default_sites() -> Self {
        let mut registry = Self::new();
        for strategy in sites::extractors() {
            registry.register(strategy);
        }
        registry
    }

    pub fn from_config(config: &ExtractorsConfig) -> Self {
        let mut registry = Self::new();
        for strategy in sites::extractors() {
            if config.disabled.iter().any(|name| name == strategy.name()) {
                debug!("Registry: strategy {} disabled by configuration", strategy.name());
                continue;
            }
            registry.register(strategy);
        }
        if !config.structured_fallback {
            registry.universal.clear();
        }
        if !config.generic_fallback {
            registry.generic = None;
        }
        registry
    }

    /// Appends a strategy; it is consulted after every earlier registration.
    pub fn register(&mut self, strategy: Box<dyn Extractor>) {
        self.strategies.push(strategy);
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn resolve(&self, url: &str) -> Option<&dyn Extractor> {
        self.strategies
            .iter()
            .find(|strategy| strategy.can_handle(url))
            .map(|strategy| strategy.as_ref())
    }

    /// Runs the fallback chain; `None` when no valid record comes out of it.
    pub fn extract(&self, content: &str, url: &str) -> Option<Recipe> {
        self.run(content, url).ok().map(|extraction| extraction.recipe)
    }

    pub fn run(&self, content: &str, url: &str) -> Result<Extraction, ExtractionFailure> {
        let context = ParsingContext::new(content, url);
        self.run_context(&context)
    }

    pub fn run_context(&self, context: &ParsingContext) -> Result<Extraction, ExtractionFailure> {
        let url = context.url.as_str();
        let mut partial: Option<Recipe> = None;
        let mut thrown: Option<(String, ExtractError)> = None;

        if let Some(strategy) = self.resolve(url) {
            debug!("Registry: {} handles {}", strategy.name(), url);
            match attempt(strategy, context, &mut partial) {
                Ok(Some(found)) => return Ok(found),
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        "Registry: strategy {} failed ({}), falling back to structured metadata",
                        strategy.name(),
                        e
                    );
                    thrown = Some((strategy.name().to_string(), e));
                }
            }
            if let Some(found) = self.universal_pass(context, &mut partial) {
                return Ok(found);
            }
        } else {
            debug!("Registry: no strategy handles {}", url);
            if let Some(found) = self.universal_pass(context, &mut partial) {
                return Ok(found);
            }
            if let Some(generic) = &self.generic {
                match attempt(generic.as_ref(), context, &mut partial) {
                    Ok(Some(found)) => return Ok(found),
                    Ok(None) => {}
                    Err(e) => debug!("Registry: generic pass found nothing ({})", e),
                }
            }
        }

        if let Some((strategy, source)) = thrown {
            return Err(ExtractionFailure::StrategyThrew {
                strategy,
                source,
                diagnostics: None,
            });
        }

        match partial {
            Some(recipe) => {
                let validation = validate(&recipe);
                warn!("Registry: best record for {} is incomplete ({})", url, validation.summary());
                Err(ExtractionFailure::ValidationFailed {
                    recipe: Box::new(recipe),
                    validation,
                    diagnostics: None,
                })
            }
            None => Err(ExtractionFailure::NoMatchingStrategy {
                url: url.to_string(),
                diagnostics: None,
            }),
        }
    }

    fn universal_pass(
        &self,
        context: &ParsingContext,
        partial: &mut Option<Recipe>,
    ) -> Option<Extraction> {
        for extractor in &self.universal {
            match attempt(extractor.as_ref(), context, partial) {
                Ok(Some(found)) => return Some(found),
                Ok(None) => {}
                Err(e) => debug!("Registry: {} found nothing ({})", extractor.name(), e),
            }
        }
        None
    }
}

/// Runs one extractor. A valid record is returned; an invalid one is kept in
/// `partial` if it is more complete than what is already there. A record with
/// no title, ingredients or instructions counts as nothing extracted.
fn attempt(
    extractor: &dyn Extractor,
    context: &ParsingContext,
    partial: &mut Option<Recipe>,
) -> Result<Option<Extraction>, ExtractError> {
    let recipe = extractor.extract(context)?;
    let validation = validate(&recipe);
    if validation.is_valid {
        info!("Registry: recipe extracted by {}", extractor.name());
        return Ok(Some(Extraction {
            recipe,
            strategy: extractor.name().to_string(),
        }));
    }

    debug!(
        "Registry: {} produced an incomplete record ({})",
        extractor.name(),
        validation.summary()
    );
    let score = completeness(&recipe);
    if score == 0 {
        return Ok(None);
    }
    let replace = match partial {
        Some(current) => score > completeness(current),
        None => true,
    };
    if replace {
        *partial = Some(recipe);
    }
    Ok(None)
}

fn completeness(recipe: &Recipe) -> usize {
    [
        !recipe.title.is_empty(),
        !recipe.ingredients.is_empty(),
        !recipe.instructions.is_empty(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count()
}
