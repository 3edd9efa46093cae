use crate::extractors::selectors::Probe;
use crate::extractors::{SiteProbes, SiteProfile};

pub static FOOD_AND_WINE: SiteProfile = SiteProfile {
    name: "foodandwine",
    hosts: &["foodandwine.com"],
    probes: SiteProbes {
        title: &[
            Probe::Css("h1.headline"),
            Probe::Css("h1.recipe-title"),
            Probe::Css("h1"),
        ],
        author: &[
            Probe::Css(".author-name"),
            Probe::Css(".by-author"),
            Probe::Css(".recipe-author"),
            Probe::Css("[rel='author']"),
        ],
        ingredients: &[
            Probe::Css(".recipe-ingredients li"),
            Probe::Css(".ingredients li"),
            Probe::Css(".recipe-ingredient"),
            Probe::Css(".mntl-structured-ingredients__list-item"),
            Probe::Css(".structured-ingredients li"),
        ],
        instructions: &[
            Probe::Css(".recipe-instructions li"),
            Probe::Css(".instructions li"),
            Probe::Css(".recipe-instruction"),
            Probe::Css(".mntl-sc-block-group--LI .mntl-sc-block"),
            Probe::Css(".recipe-directions li"),
        ],
        image: &[
            Probe::Attr(".recipe-image img", "src"),
            Probe::Attr(".hero-image img", "src"),
            Probe::Attr(".primary-image img", "src"),
        ],
        prep_time: &[Probe::Css(".prep-time, .recipe-prep-time, [itemprop='prepTime']")],
        cook_time: &[Probe::Css(".cook-time, .recipe-cook-time, [itemprop='cookTime']")],
        total_time: &[Probe::Css(".total-time, .recipe-total-time, [itemprop='totalTime']")],
        servings: &[Probe::Css(
            ".servings, .recipe-servings, .recipe-yield, [itemprop='recipeYield']",
        )],
        ..SiteProbes::EMPTY
    },
    ..SiteProfile::BASE
};
