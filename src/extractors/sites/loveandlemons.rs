use crate::extractors::selectors::Probe;
use crate::extractors::site::title_contains;
use crate::extractors::{PageMissing, ParsingContext, SiteProbes, SiteProfile};

pub static LOVE_AND_LEMONS: SiteProfile = SiteProfile {
    name: "loveandlemons",
    hosts: &["loveandlemons.com"],
    probes: SiteProbes {
        title: &[Probe::Css("h1.entry-title"), Probe::Css(".wprm-recipe-name")],
        ingredients: &[Probe::Css(".wprm-recipe-ingredient")],
        instructions: &[Probe::Css(".wprm-recipe-instruction-text")],
        image: &[Probe::Attr(".wprm-recipe-image img", "src")],
        prep_time: &[Probe::Css(".wprm-recipe-prep_time-container")],
        cook_time: &[Probe::Css(".wprm-recipe-cook_time-container")],
        total_time: &[Probe::Css(".wprm-recipe-total_time-container")],
        servings: &[Probe::Css(".wprm-recipe-servings")],
        notes: &[Probe::Css(".wprm-recipe-notes")],
        ..SiteProbes::EMPTY
    },
    default_author: Some("Jeanine Donofrio"),
    page_missing: Some((is_error_page, PageMissing::EmptyRecord)),
    ..SiteProfile::BASE
};

fn is_error_page(context: &ParsingContext) -> bool {
    title_contains(context, &["page not found", "404"])
}
