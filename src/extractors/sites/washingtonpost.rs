use crate::extractors::selectors::{collect, Probe};
use crate::extractors::{IncompletePolicy, ParsingContext, SiteProbes, SiteProfile};
use crate::model::Recipe;
use regex::Regex;
use std::sync::LazyLock;

const DEFAULT_TITLE: &str = "Recipe from Washington Post";
const SITE_ORIGIN: &str = "https://washingtonpost.com";

const INGREDIENT_HEADERS: [&str; 4] = ["ingredients", "for the", "you will need", "shopping list"];
const INSTRUCTION_HEADERS: [&str; 4] = ["instructions", "method", "directions", "steps"];

static INGREDIENT_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d+.*(?:cup|tablespoon|teaspoon|pound|ounce|gram|kg|lb)|\b(?:salt|pepper|oil|butter|flour|sugar|egg|milk|water|onion|garlic)\b|^\d+(?:\s*-\s*\d+)?\s+",
    )
    .expect("valid regex")
});

static INSTRUCTION_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:heat|cook|add|mix|stir|bake|roast|grill|sauté|simmer|boil)|(?:minutes?|hours?|until|degrees?|°[CF])|\b(?:oven|pan|skillet|pot|bowl|plate)\b",
    )
    .expect("valid regex")
});

pub static WASHINGTON_POST: SiteProfile = SiteProfile {
    name: "washingtonpost",
    hosts: &["washingtonpost.com"],
    matches: Some(is_recipe_url),
    probes: SiteProbes {
        title: &[
            Probe::Css("h1[data-qa='headline']"),
            Probe::Css("h1.headline"),
            Probe::Css("h1.font--headline"),
            Probe::Css("h1"),
            Probe::Css(".headline h1"),
            Probe::Css("[data-qa='headline']"),
        ],
        ingredients: &[
            Probe::Css(".recipe-ingredients li"),
            Probe::Css(".ingredients-section li"),
            Probe::Css(".ingredient-list li"),
            Probe::Css("ul[data-qa='ingredients'] li"),
            Probe::Css(".wpds-box ul li"),
            Probe::Css("li[data-ingredient]"),
        ],
        instructions: &[
            Probe::Css(".recipe-instructions li"),
            Probe::Css(".instructions-section li"),
            Probe::Css(".method-steps li"),
            Probe::Css("ol[data-qa='instructions'] li"),
            Probe::Css(".recipe-method li"),
            Probe::Css(".directions li"),
        ],
        image: &[
            Probe::Attr(".recipe-hero img", "src"),
            Probe::Attr(".recipe-hero img", "data-src"),
            Probe::Attr(".lead-image img", "src"),
            Probe::Attr(".featured-image img", "src"),
            Probe::Attr("img[data-qa='hero-image']", "src"),
            Probe::Attr(".wpds-image img", "src"),
        ],
        prep_time: &[Probe::Css("[data-qa='prep-time'], .prep-time")],
        cook_time: &[Probe::Css("[data-qa='cook-time'], .cook-time")],
        total_time: &[Probe::Css("[data-qa='total-time'], .total-time")],
        servings: &[Probe::Css("[data-qa='servings'], .servings, .yield")],
        notes: &[
            Probe::Css(".recipe-description"),
            Probe::Css(".article-summary"),
            Probe::Css(".dek"),
        ],
        ..SiteProbes::EMPTY
    },
    on_incomplete: IncompletePolicy::Reject,
    keep_ingredient: is_not_ingredient_header,
    keep_instruction: is_not_instruction_header,
    refine: Some(refine_article),
    ..SiteProfile::BASE
};

/// Only food-section or recipe URLs; general news articles are left alone.
fn is_recipe_url(url: &str) -> bool {
    let url = url.to_lowercase();
    url.contains("washingtonpost.com/food")
        || (url.contains("washingtonpost.com") && url.contains("recipe"))
}

fn is_not_ingredient_header(text: &str) -> bool {
    let text = text.to_lowercase();
    !INGREDIENT_HEADERS.iter().any(|header| text.contains(header))
}

fn is_not_instruction_header(text: &str) -> bool {
    let text = text.to_lowercase();
    !INSTRUCTION_HEADERS.iter().any(|header| text.contains(header))
}

fn looks_like_ingredient(text: &str) -> bool {
    text.chars().count() < 200 && INGREDIENT_LIKE.is_match(text)
}

fn looks_like_instruction(text: &str) -> bool {
    let length = text.chars().count();
    length > 20 && length < 500 && INSTRUCTION_LIKE.is_match(text)
}

/// Recipes embedded in article prose have no lists; classify paragraphs instead.
fn refine_article(context: &ParsingContext, recipe: &mut Recipe) {
    let paragraphs = || collect(&context.document, &Probe::Css("p"));

    if recipe.ingredients.is_empty() {
        recipe.set_ingredients(
            paragraphs()
                .into_iter()
                .filter(|text| looks_like_ingredient(text)),
        );
    }
    if recipe.instructions.is_empty() {
        recipe.set_instructions(
            paragraphs()
                .into_iter()
                .filter(|text| looks_like_instruction(text)),
        );
    }
    if recipe.instructions.is_empty() {
        if let Some(description) = recipe.notes.first().cloned() {
            recipe.set_instructions([description]);
        }
    }

    if recipe.title.is_empty() {
        recipe.title = DEFAULT_TITLE.to_string();
    }

    if let Some(image) = &recipe.image_url {
        if image.starts_with('/') && !image.starts_with("//") {
            recipe.image_url = Some(format!("{SITE_ORIGIN}{image}"));
        }
    }
}
