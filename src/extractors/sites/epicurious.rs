use crate::extractors::selectors::Probe;
use crate::extractors::site::title_contains;
use crate::extractors::{PageMissing, ParsingContext, SiteProbes, SiteProfile};

pub static EPICURIOUS: SiteProfile = SiteProfile {
    name: "epicurious",
    hosts: &["epicurious.com"],
    probes: SiteProbes {
        title: &[Probe::Css("h1.recipe-hed"), Probe::Css("h1")],
        author: &[
            Probe::Css(".author-name"),
            Probe::Css(".by-author"),
            Probe::Css("[data-testid='BylineWrapper'] a"),
            Probe::Css("[data-testid='BylineWrapper']"),
        ],
        ingredients: &[
            Probe::Css(".recipe-ingredients li"),
            Probe::Css(".ingredients li"),
            Probe::Css("[data-testid='IngredientList'] .ingredient-description"),
            Probe::Css(".ingredient"),
        ],
        instructions: &[
            Probe::Css(".recipe-instructions li"),
            Probe::Css(".instructions li"),
            Probe::Css("[data-testid='InstructionsWrapper'] li"),
            Probe::Css(".preparation li"),
        ],
        image: &[
            Probe::Attr(".recipe-header-image img", "src"),
            Probe::Attr(".recipe-image img", "src"),
            Probe::Attr(".hero-image img", "src"),
        ],
        prep_time: &[Probe::Css(".prep-time, [data-testid='PrepTime']")],
        cook_time: &[Probe::Css(".cook-time, [data-testid='CookTime']")],
        total_time: &[Probe::Css(".total-time, [data-testid='TotalTime']")],
        servings: &[Probe::Css(".servings, .recipe-yield, [data-testid='Yield']")],
        ..SiteProbes::EMPTY
    },
    page_missing: Some((is_error_page, PageMissing::Fail)),
    ..SiteProfile::BASE
};

fn is_error_page(context: &ParsingContext) -> bool {
    title_contains(context, &["Page Not Found | Epicurious"])
}
