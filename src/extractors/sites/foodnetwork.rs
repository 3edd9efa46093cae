use crate::extractors::selectors::Probe;
use crate::extractors::site::{body_contains, title_contains};
use crate::extractors::{IncompletePolicy, PageMissing, ParsingContext, SiteProbes, SiteProfile};

pub static FOOD_NETWORK: SiteProfile = SiteProfile {
    name: "foodnetwork",
    hosts: &["foodnetwork.com"],
    probes: SiteProbes {
        title: &[
            Probe::Css("h1.o-AssetTitle__a-HeadlineText"),
            Probe::Css("h1.recipe-title"),
            Probe::Css("h1"),
        ],
        author: &[
            Probe::Css(".o-Attribution__a-Name"),
            Probe::Css(".recipe-author"),
            Probe::Css(".chef-name"),
        ],
        ingredients: &[
            Probe::Css(".o-Ingredients__a-Ingredient--CheckboxLabel"),
            Probe::Css(".o-Ingredients__a-Ingredient"),
            Probe::Css(".ingredients-list__item"),
            Probe::Css(".recipe-ingredients li"),
            Probe::AfterHeading {
                heading: "h2",
                keyword: "ingredients",
                list: "ul",
            },
        ],
        instructions: &[
            Probe::Css(".o-Method__m-Step"),
            Probe::Css(".o-Method__m-Body li"),
            Probe::Css(".o-Method li"),
            Probe::Css("[data-module='InstructionsList'] li"),
            Probe::Css(".recipe-instructions ol li"),
            Probe::Css(".recipe-instructions li"),
            Probe::Css(".recipe-directions li"),
            Probe::Css("section[aria-labelledby='recipe-instructions-section'] li"),
            Probe::Css("ul.instructions li"),
            Probe::AfterHeading {
                heading: "h2",
                keyword: "directions",
                list: "ul",
            },
            Probe::AfterHeading {
                heading: "h2",
                keyword: "instructions",
                list: "ul",
            },
        ],
        image: &[
            Probe::Attr(".recipe-hero img", "src"),
            Probe::Attr(".o-AssetPhoto img", "src"),
        ],
        prep_time: &[
            Probe::Css(".recipe-timing .prep-time"),
            Probe::Css("[data-testid='prep-time']"),
            Probe::Css(".preparation-time"),
            Probe::Css(".recipe-meta-prep, .prep-time-value, [data-prep-time]"),
            Probe::Css(".time-prep"),
        ],
        cook_time: &[
            Probe::Css(".recipe-timing .cook-time"),
            Probe::Css("[data-testid='cook-time']"),
            Probe::Css(".cooking-time"),
            Probe::Css(".recipe-meta-cook, .cook-time-value, [data-cook-time]"),
            Probe::Css(".time-cook"),
        ],
        total_time: &[
            Probe::Css(".o-RecipeInfo__a-Description--Total"),
            Probe::Css(".recipe-timing .total-time"),
            Probe::Css("[data-testid='total-time']"),
            Probe::Css(".recipe-duration"),
            Probe::Css(".recipe-meta-total, .total-time-value, [data-total-time]"),
        ],
        servings: &[
            Probe::Css(".recipe-servings, [data-testid='servings'], [data-servings]"),
            Probe::Css(".recipe-yield, .servings-value, .recipe-meta-servings"),
            Probe::Css(".nutrition-info .servings, .recipe-facts .servings"),
        ],
        ..SiteProbes::EMPTY
    },
    default_author: Some("Food Network"),
    on_incomplete: IncompletePolicy::Reject,
    page_missing: Some((is_error_page, PageMissing::Fail)),
    keep_ingredient: is_ingredient,
    ..SiteProfile::BASE
};

fn is_error_page(context: &ParsingContext) -> bool {
    title_contains(context, &["Page Not Found | Food Network"])
        || body_contains(
            context,
            &["The page you're looking for seems to have disappeared!"],
        )
}

/// The ingredient list starts with a "Deselect All" checkbox.
fn is_ingredient(text: &str) -> bool {
    !text.eq_ignore_ascii_case("deselect all")
}
