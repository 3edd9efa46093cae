use super::json_ld::{extract_structured_recipe, recipe_from_node};
use super::selectors::{first_list, first_text, Probe};
use super::{Extractor, ParsingContext};
use crate::error::ExtractError;
use crate::model::Recipe;
use crate::validation::validate;
use log::{debug, info, warn};

const OG_IMAGE: Probe = Probe::Attr("meta[property='og:image']", "content");

/// What a publisher extractor does when its record fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompletePolicy {
    /// Fail with [`ExtractError::Incomplete`].
    Reject,
    /// Return the partial record and let the caller decide.
    Partial,
}

/// What a publisher extractor does on a detected error page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMissing {
    Fail,
    EmptyRecord,
}

/// Ordered selector fallbacks per field. Empty slices mean "not probed".
#[derive(Debug, Clone, Copy)]
pub struct SiteProbes {
    pub title: &'static [Probe],
    pub author: &'static [Probe],
    pub ingredients: &'static [Probe],
    pub instructions: &'static [Probe],
    pub image: &'static [Probe],
    pub prep_time: &'static [Probe],
    pub cook_time: &'static [Probe],
    pub total_time: &'static [Probe],
    pub servings: &'static [Probe],
    pub notes: &'static [Probe],
    pub tags: &'static [Probe],
}

impl SiteProbes {
    pub const EMPTY: SiteProbes = SiteProbes {
        title: &[],
        author: &[],
        ingredients: &[],
        instructions: &[],
        image: &[],
        prep_time: &[],
        cook_time: &[],
        total_time: &[],
        servings: &[],
        notes: &[],
        tags: &[],
    };
}

/// Everything that distinguishes one publisher's extraction from another's.
pub struct SiteProfile {
    pub name: &'static str,
    /// Locator substrings, any of which selects this profile.
    pub hosts: &'static [&'static str],
    /// Replaces the `hosts` check when the locator rule is more involved.
    pub matches: Option<fn(&str) -> bool>,
    pub probes: SiteProbes,
    pub default_author: Option<&'static str>,
    pub on_incomplete: IncompletePolicy,
    pub page_missing: Option<(fn(&ParsingContext) -> bool, PageMissing)>,
    pub keep_ingredient: fn(&str) -> bool,
    pub keep_instruction: fn(&str) -> bool,
    /// Runs after the selector pass (and after borrowing from structured
    /// metadata) to fill what the probes cannot express.
    pub refine: Option<fn(&ParsingContext, &mut Recipe)>,
}

fn keep_all(_: &str) -> bool {
    true
}

impl SiteProfile {
    pub const BASE: SiteProfile = SiteProfile {
        name: "",
        hosts: &[],
        matches: None,
        probes: SiteProbes::EMPTY,
        default_author: None,
        on_incomplete: IncompletePolicy::Partial,
        page_missing: None,
        keep_ingredient: keep_all,
        keep_instruction: keep_all,
        refine: None,
    };
}

/// Publisher strategy driven by a [`SiteProfile`].
///
/// Structured metadata is tried first; if it is absent or incomplete the
/// profile's selector probes are used, borrowing any field the metadata did
/// provide.
pub struct SiteExtractor {
    profile: &'static SiteProfile,
}

impl SiteExtractor {
    pub fn new(profile: &'static SiteProfile) -> Self {
        Self { profile }
    }

    fn from_selectors(&self, context: &ParsingContext) -> Recipe {
        let doc = &context.document;
        let probes = &self.profile.probes;
        let mut recipe = Recipe::new(&context.url);

        recipe.title = first_text(doc, probes.title).unwrap_or_default();
        recipe.author = first_text(doc, probes.author).map(|a| strip_byline(&a));
        recipe.set_ingredients(first_list(doc, probes.ingredients, self.profile.keep_ingredient));
        recipe.set_instructions(first_list(
            doc,
            probes.instructions,
            self.profile.keep_instruction,
        ));
        recipe.image_url =
            first_text(doc, probes.image).or_else(|| first_text(doc, &[OG_IMAGE]));
        recipe.prep_time = first_text(doc, probes.prep_time);
        recipe.cook_time = first_text(doc, probes.cook_time);
        recipe.total_time = first_text(doc, probes.total_time);
        recipe.servings = first_text(doc, probes.servings);
        recipe.notes = first_list(doc, probes.notes, keep_all);
        recipe.add_tags(first_list(doc, probes.tags, keep_all));

        recipe
    }

    fn apply_default_author(&self, recipe: &mut Recipe) {
        if recipe.author.is_none() {
            recipe.author = self.profile.default_author.map(str::to_string);
        }
    }
}

impl Extractor for SiteExtractor {
    fn name(&self) -> &str {
        self.profile.name
    }

    fn can_handle(&self, url: &str) -> bool {
        match self.profile.matches {
            Some(matches) => matches(url),
            None => {
                let url = url.to_lowercase();
                self.profile.hosts.iter().any(|host| url.contains(host))
            }
        }
    }

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ExtractError> {
        let name = self.profile.name;

        if let Some((is_missing, policy)) = self.profile.page_missing {
            if is_missing(context) {
                warn!("{}: error page detected at {}", name, context.url);
                return match policy {
                    PageMissing::Fail => Err(ExtractError::PageNotFound {
                        site: name,
                        url: context.url.clone(),
                    }),
                    PageMissing::EmptyRecord => Ok(Recipe::new(&context.url)),
                };
            }
        }

        let structured = extract_structured_recipe(&context.document).map(|node| {
            let mut recipe = recipe_from_node(&node, &context.url);
            self.apply_default_author(&mut recipe);
            recipe
        });
        if let Some(recipe) = &structured {
            if validate(recipe).is_valid {
                info!("{}: extracted recipe from structured metadata", name);
                return Ok(recipe.clone());
            }
            debug!("{}: structured metadata incomplete, probing selectors", name);
        }

        let mut recipe = self.from_selectors(context);
        if let Some(structured) = structured {
            fill_missing(&mut recipe, structured);
        }
        if let Some(refine) = self.profile.refine {
            refine(context, &mut recipe);
        }
        self.apply_default_author(&mut recipe);

        let validation = validate(&recipe);
        if validation.is_valid {
            info!("{}: extracted recipe from page selectors", name);
            return Ok(recipe);
        }

        match self.profile.on_incomplete {
            IncompletePolicy::Reject => Err(ExtractError::Incomplete {
                site: name,
                validation,
            }),
            IncompletePolicy::Partial => {
                debug!("{}: returning partial recipe ({})", name, validation.summary());
                Ok(recipe)
            }
        }
    }
}

/// Copies fields the selector pass did not find from the structured record.
fn fill_missing(recipe: &mut Recipe, structured: Recipe) {
    if recipe.title.is_empty() {
        recipe.title = structured.title;
    }
    if recipe.ingredients.is_empty() {
        recipe.ingredients = structured.ingredients;
    }
    if recipe.instructions.is_empty() {
        recipe.instructions = structured.instructions;
    }
    recipe.author = recipe.author.take().or(structured.author);
    recipe.image_url = recipe.image_url.take().or(structured.image_url);
    recipe.prep_time = recipe.prep_time.take().or(structured.prep_time);
    recipe.cook_time = recipe.cook_time.take().or(structured.cook_time);
    recipe.total_time = recipe.total_time.take().or(structured.total_time);
    recipe.servings = recipe.servings.take().or(structured.servings);
    if recipe.notes.is_empty() {
        recipe.notes = structured.notes;
    }
    recipe.add_tags(structured.tags);
}

fn strip_byline(author: &str) -> String {
    let trimmed = author.trim();
    match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("by ") => trimmed[3..].trim().to_string(),
        _ => trimmed.to_string(),
    }
}

/// True when the page `<title>` contains any of `markers` (case-insensitive).
pub(crate) fn title_contains(context: &ParsingContext, markers: &[&str]) -> bool {
    let title = context.page_title().to_lowercase();
    markers
        .iter()
        .any(|marker| title.contains(&marker.to_lowercase()))
}

/// True when the page's visible text contains any of `markers`.
pub(crate) fn body_contains(context: &ParsingContext, markers: &[&str]) -> bool {
    let text = super::selectors::collect(&context.document, &Probe::Css("body")).join(" ");
    markers.iter().any(|marker| text.contains(marker))
}
