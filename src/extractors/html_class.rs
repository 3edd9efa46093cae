use super::selectors::{first_list, first_text, select, Probe};
use super::{Extractor, ParsingContext};
use crate::error::ExtractError;
use crate::model::Recipe;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Last-resort pass for pages no publisher profile matches.
///
/// Tries the class names of common WordPress recipe plugins, then generic
/// recipe-ish containers, then plain page structure: the first heading for the
/// title, list items that start with a quantity and unit for ingredients, and
/// long ordered-list items for instructions.
pub struct HtmlClassExtractor;

const MIN_STEP_LENGTH: usize = 20;

static QUANTITY_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:\d+(?:[./]\d+)?|\d+\s+\d+/\d+|[½⅓⅔¼¾⅛])\s*(?:-\s*\d+\s*)?(?:cups?|tbsps?|tablespoons?|tsps?|teaspoons?|pounds?|lbs?|ounces?|oz|grams?|g|kg|ml|l|liters?|litres?|pinch(?:es)?|dash(?:es)?|cloves?|cans?|sticks?|slices?|large|medium|small|whole)\b",
    )
    .expect("valid regex")
});

const TITLE: &[Probe] = &[
    Probe::Css(".wprm-recipe-name"),
    Probe::Css(".tasty-recipes-title"),
    Probe::Css(".mv-create-title"),
    Probe::Css(".recipe-card-title"),
    Probe::Css(".wpzoom-recipe-card-title"),
    Probe::Css(".recipe-title"),
    Probe::Css(".recipe-name"),
];

const INGREDIENTS: &[Probe] = &[
    Probe::Css(".wprm-recipe-ingredient"),
    Probe::Css(".tasty-recipes-ingredients li"),
    Probe::Css(".mv-create-ingredients li"),
    Probe::Css(".wpzoom-recipe-ingredients li"),
    Probe::Css(".recipe-ingredients li"),
    Probe::Css(".ingredients li"),
    Probe::Css("[data-ingredient] li"),
    Probe::Css(".ingredient-list li"),
    Probe::Css(".structured-ingredients li"),
];

const INSTRUCTIONS: &[Probe] = &[
    Probe::Css(".wprm-recipe-instruction-text"),
    Probe::Css(".tasty-recipes-instructions li"),
    Probe::Css(".mv-create-instructions li"),
    Probe::Css(".wpzoom-recipe-instructions li"),
    Probe::Css(".recipe-instructions li"),
    Probe::Css(".instructions li"),
    Probe::Css(".recipe-directions li"),
    Probe::Css("[data-instruction] li"),
    Probe::Css(".structured-instructions li"),
];

const AUTHOR: &[Probe] = &[
    Probe::Css(".wprm-recipe-author"),
    Probe::Css(".tasty-recipes-author-name"),
    Probe::Css(".recipe-author"),
    Probe::Attr("meta[name='author']", "content"),
];

const IMAGE: &[Probe] = &[
    Probe::Attr(".wprm-recipe-image img", "src"),
    Probe::Attr(".tasty-recipes-image img", "src"),
    Probe::Attr("meta[property='og:image']", "content"),
];

const PREP_TIME: &[Probe] = &[
    Probe::Css(".wprm-recipe-prep_time-container"),
    Probe::Css(".tasty-recipes-prep-time"),
    Probe::Css(".mv-create-time-prep .mv-create-time-format"),
    Probe::Css(".recipe-prep-time"),
    Probe::Css(".prep-time"),
];

const COOK_TIME: &[Probe] = &[
    Probe::Css(".wprm-recipe-cook_time-container"),
    Probe::Css(".tasty-recipes-cook-time"),
    Probe::Css(".mv-create-time-active .mv-create-time-format"),
    Probe::Css(".recipe-cook-time"),
    Probe::Css(".cook-time"),
];

const TOTAL_TIME: &[Probe] = &[
    Probe::Css(".wprm-recipe-total_time-container"),
    Probe::Css(".tasty-recipes-total-time"),
    Probe::Css(".mv-create-time-total .mv-create-time-format"),
    Probe::Css(".recipe-total-time"),
    Probe::Css(".total-time"),
];

const SERVINGS: &[Probe] = &[
    Probe::Css(".wprm-recipe-servings"),
    Probe::Css(".tasty-recipes-yield"),
    Probe::Css(".mv-create-yield"),
    Probe::Css(".recipe-yield"),
    Probe::Css(".recipe-servings"),
];

const NOTES: &[Probe] = &[
    Probe::Css(".wprm-recipe-notes"),
    Probe::Css(".tasty-recipes-notes"),
    Probe::Css(".mv-create-notes"),
    Probe::Css(".recipe-notes"),
];

impl HtmlClassExtractor {
    fn title(&self, context: &ParsingContext) -> String {
        let doc = &context.document;
        first_text(doc, TITLE)
            .or_else(|| {
                ["h1", "h2"].into_iter().find_map(|tag| {
                    first_list(doc, &[Probe::Css(tag)], |text| text.chars().count() > 2)
                        .into_iter()
                        .next()
                })
            })
            .unwrap_or_else(|| context.page_title())
    }

    fn ingredients(&self, context: &ParsingContext) -> Vec<String> {
        let found = first_list(&context.document, INGREDIENTS, |_| true);
        if !found.is_empty() {
            return found;
        }
        debug!("HtmlClassExtractor: no ingredient container, scanning list items");
        first_list(&context.document, &[Probe::Css("li")], |text| {
            QUANTITY_UNIT.is_match(text)
        })
    }

    fn instructions(&self, context: &ParsingContext) -> Vec<String> {
        let found = first_list(&context.document, INSTRUCTIONS, |_| true);
        if !found.is_empty() {
            return found;
        }
        debug!("HtmlClassExtractor: no instruction container, scanning ordered lists");
        first_list(&context.document, &[Probe::Css("ol li")], |text| {
            text.chars().count() >= MIN_STEP_LENGTH
        })
    }
}

impl Extractor for HtmlClassExtractor {
    fn name(&self) -> &str {
        "html-class"
    }

    fn can_handle(&self, _url: &str) -> bool {
        true
    }

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ExtractError> {
        debug!("Attempting to extract recipe using HTML class matchers");
        let doc = &context.document;

        let ingredients = self.ingredients(context);
        let instructions = self.instructions(context);
        if ingredients.is_empty() && instructions.is_empty() {
            return Err(ExtractError::NoContent(
                "no ingredient or instruction lists on the page".to_string(),
            ));
        }

        let mut recipe = Recipe::new(&context.url);
        recipe.title = self.title(context);
        recipe.set_ingredients(ingredients);
        recipe.set_instructions(instructions);
        recipe.author = first_text(doc, AUTHOR);
        recipe.image_url = first_text(doc, IMAGE).or_else(|| {
            select(doc, "img")
                .into_iter()
                .find_map(|img| img.value().attr("src").map(|src| src.trim().to_string()))
                .filter(|src| !src.is_empty())
        });
        recipe.prep_time = first_text(doc, PREP_TIME);
        recipe.cook_time = first_text(doc, COOK_TIME);
        recipe.total_time = first_text(doc, TOTAL_TIME);
        recipe.servings = first_text(doc, SERVINGS);
        recipe.notes = first_list(doc, NOTES, |_| true);

        debug!("Recipe name: {}", recipe.title);
        debug!("Ingredients count: {}", recipe.ingredients.len());
        debug!("Instructions count: {}", recipe.instructions.len());

        Ok(recipe)
    }
}
