use crate::extractors::selectors::{element_text, select, Probe};
use crate::extractors::{ParsingContext, SiteProbes, SiteProfile};
use crate::model::Recipe;
use crate::normalize::non_empty;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));

static QUANTITY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d|[½⅓⅔¼¾⅛]|a |an |one |two |pinch)").expect("valid regex")
});

static INSTRUCTION_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Preheat oven|\bBake\b|\bAllow to cool\b|\bDo ahead\b|\bFlouring\b|\bSift together\b|\bPour into\b|\bMelt together\b|\bStir\b|\bAdd to\b|\bDo not overbake\b",
    )
    .expect("valid regex")
});

pub static SMITTEN_KITCHEN: SiteProfile = SiteProfile {
    name: "smittenkitchen",
    hosts: &["smittenkitchen.com"],
    probes: SiteProbes {
        title: &[
            Probe::Css("h1.entry-title"),
            Probe::Css("h1.post-title"),
            Probe::Css("h1"),
        ],
        author: &[Probe::Css(".byline .author")],
        ingredients: &[
            Probe::Css(".jetpack-recipe-ingredients li"),
            Probe::Css(".recipe-ingredients li"),
        ],
        instructions: &[
            Probe::Css(".jetpack-recipe-directions p"),
            Probe::Css(".recipe-instructions li"),
        ],
        image: &[
            Probe::Attr("meta[property='og:image']", "content"),
            Probe::Attr(".post-thumbnail-container img", "src"),
        ],
        ..SiteProbes::EMPTY
    },
    default_author: Some("Deb Perelman"),
    refine: Some(recipe_from_paragraphs),
    ..SiteProfile::BASE
};

/// Older posts write the recipe as prose: one paragraph of `<br>`-separated
/// ingredient lines followed by instruction paragraphs.
fn recipe_from_paragraphs(context: &ParsingContext, recipe: &mut Recipe) {
    let paragraphs = select(&context.document, ".entry-content p");

    let ingredient_index = paragraphs.iter().position(|p| {
        let lines = split_lines(&p.inner_html());
        lines.len() >= 2
            && lines
                .iter()
                .filter(|line| QUANTITY_START.is_match(&line.to_lowercase()))
                .count()
                * 2
                >= lines.len()
    });
    let Some(ingredient_index) = ingredient_index else {
        return;
    };

    if recipe.ingredients.is_empty() {
        recipe.set_ingredients(split_lines(&paragraphs[ingredient_index].inner_html()));
    }
    if recipe.instructions.is_empty() {
        recipe.set_instructions(
            paragraphs[ingredient_index + 1..]
                .iter()
                .map(|p| element_text(*p))
                .filter(|text| INSTRUCTION_CUE.is_match(text)),
        );
    }
}

fn split_lines(html: &str) -> Vec<String> {
    LINE_BREAK
        .split(html)
        .filter_map(|piece| {
            let fragment = Html::parse_fragment(piece);
            non_empty(&element_text(fragment.root_element()))
        })
        .collect()
}
