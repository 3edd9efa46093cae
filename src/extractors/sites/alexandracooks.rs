use crate::extractors::selectors::Probe;
use crate::extractors::{IncompletePolicy, SiteProbes, SiteProfile};

pub static ALEXANDRA_COOKS: SiteProfile = SiteProfile {
    name: "alexandracooks",
    hosts: &["alexandracooks.com"],
    probes: SiteProbes {
        title: &[
            Probe::Css("h1.entry-title"),
            Probe::Css("h1.post-title"),
            Probe::Css(".recipe-title h1"),
            Probe::Css("h1"),
        ],
        author: &[Probe::Css(".tasty-recipes-author-name")],
        ingredients: &[
            Probe::Css(".tasty-recipes-ingredients li"),
            Probe::Css(".recipe-ingredients li"),
            Probe::Css(".ingredients li"),
        ],
        instructions: &[
            Probe::Css(".tasty-recipes-instructions li"),
            Probe::Css(".recipe-instructions li"),
            Probe::Css(".instructions li"),
        ],
        image: &[
            Probe::Attr(".tasty-recipes-image img", "src"),
            Probe::Attr(".recipe-image img", "src"),
            Probe::Attr(".entry-content img", "src"),
        ],
        prep_time: &[Probe::Css(".tasty-recipes-prep-time, .recipe-prep-time")],
        cook_time: &[Probe::Css(".tasty-recipes-cook-time, .recipe-cook-time")],
        total_time: &[Probe::Css(".tasty-recipes-total-time, .recipe-total-time")],
        servings: &[Probe::Css(".tasty-recipes-yield, .recipe-servings")],
        notes: &[Probe::Css(".tasty-recipes-notes p")],
        ..SiteProbes::EMPTY
    },
    default_author: Some("Alexandra Stafford"),
    on_incomplete: IncompletePolicy::Reject,
    ..SiteProfile::BASE
};
