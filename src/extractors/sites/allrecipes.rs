use crate::extractors::selectors::{collect, Probe};
use crate::extractors::{PageMissing, ParsingContext, SiteProbes, SiteProfile};

pub static ALL_RECIPES: SiteProfile = SiteProfile {
    name: "allrecipes",
    hosts: &["allrecipes.com"],
    probes: SiteProbes {
        title: &[
            Probe::Css("h1.headline"),
            Probe::Css("h1.recipe-title"),
            Probe::Css("h1"),
        ],
        author: &[
            Probe::Css(".recipe-author"),
            Probe::Css(".by-author"),
            Probe::Css(".author-name"),
            Probe::Css(".mntl-attribution__item-name"),
        ],
        ingredients: &[
            Probe::Css(".recipe-ingredients li"),
            Probe::Css(".mntl-structured-ingredients__list-item"),
            Probe::Css(".ingredients li"),
            Probe::Css("[data-ingredient] li"),
            Probe::Css("ul li"),
        ],
        instructions: &[
            Probe::Css(".recipe-instructions li"),
            Probe::Css(".mntl-sc-block-group--LI .mntl-sc-block"),
            Probe::Css(".instructions li"),
            Probe::Css("[data-instruction] li"),
            Probe::Css("ol li"),
        ],
        image: &[
            Probe::Attr(".recipe-image img", "src"),
            Probe::Attr(".hero-image img", "src"),
            Probe::Attr(".primary-image img", "src"),
        ],
        prep_time: &[
            Probe::Css(".prep-time, .recipe-prep-time, [data-prep-time]"),
            Probe::Css(".recipe-timing .prep-time, [data-testid='prep-time'], .preparation-time"),
            Probe::Css("[aria-label*='prep'], [title*='prep'], .recipe-meta-prep"),
        ],
        cook_time: &[
            Probe::Css(".cook-time, .recipe-cook-time, [data-cook-time]"),
            Probe::Css(".recipe-timing .cook-time, [data-testid='cook-time'], .cooking-time"),
            Probe::Css("[aria-label*='cook'], [title*='cook'], .recipe-meta-cook"),
        ],
        total_time: &[
            Probe::Css(".total-time, .recipe-total-time, [data-total-time]"),
            Probe::Css(".recipe-timing .total-time, [data-testid='total-time'], .recipe-duration"),
            Probe::Css("[aria-label*='total'], [title*='total'], .recipe-meta-total"),
        ],
        servings: &[
            Probe::Css(".servings, .recipe-yield, .recipe-servings, [data-servings]"),
            Probe::Css(
                "[data-testid='recipe-servings'], [data-testid='servings'], .nutrition-servings",
            ),
            Probe::Css(".recipe-meta-servings, .recipe-summary-servings, [aria-label*='servings']"),
            Probe::Css(".recipe-facts .servings, .nutrition-info .servings"),
        ],
        ..SiteProbes::EMPTY
    },
    page_missing: Some((is_error_page, PageMissing::EmptyRecord)),
    ..SiteProfile::BASE
};

fn is_error_page(context: &ParsingContext) -> bool {
    let points_at_404 = [
        Probe::Attr("link[rel='canonical']", "href"),
        Probe::Attr("meta[property='og:url']", "content"),
    ]
    .iter()
    .flat_map(|probe| collect(&context.document, probe))
    .any(|url| url.contains("/404"));

    points_at_404 || context.page_title() == "Page Not Found"
}
