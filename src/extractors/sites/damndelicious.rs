use crate::extractors::selectors::Probe;
use crate::extractors::{SiteProbes, SiteProfile};

pub static DAMN_DELICIOUS: SiteProfile = SiteProfile {
    name: "damndelicious",
    hosts: &["damndelicious.net"],
    probes: SiteProbes {
        title: &[
            Probe::Css("h1.entry-title"),
            Probe::Css("h1.post-title"),
            Probe::Css("h1"),
        ],
        author: &[Probe::Css(".author"), Probe::Css(".by-author")],
        ingredients: &[
            Probe::Css(".recipe-card-ingredients li"),
            Probe::Css(".wp-block-recipe-card-ingredients li"),
            Probe::Css(".ingredients li"),
            Probe::Css(".recipe-ingredients li"),
            Probe::AfterHeading {
                heading: "h3",
                keyword: "ingredients",
                list: "ul",
            },
            Probe::Css(".entry-content ul li"),
        ],
        instructions: &[
            Probe::Css(".recipe-card-directions li"),
            Probe::Css(".wp-block-recipe-card-directions li"),
            Probe::Css(".instructions ol li"),
            Probe::Css(".recipe-instructions ol li"),
            Probe::AfterHeading {
                heading: "h3",
                keyword: "directions",
                list: "ol",
            },
            Probe::Css(".entry-content ol li"),
        ],
        image: &[
            Probe::Attr(".recipe-card-image img", "src"),
            Probe::Attr(".post-thumbnail img", "src"),
            Probe::Attr(".wp-post-image", "src"),
        ],
        prep_time: &[Probe::Css(
            ".recipe-card-prep-time, .prep-time, [itemprop='prepTime']",
        )],
        cook_time: &[Probe::Css(
            ".recipe-card-cook-time, .cook-time, [itemprop='cookTime']",
        )],
        total_time: &[Probe::Css(
            ".recipe-card-total-time, .total-time, [itemprop='totalTime']",
        )],
        servings: &[Probe::Css(
            ".recipe-card-servings, .servings, [itemprop='recipeYield']",
        )],
        ..SiteProbes::EMPTY
    },
    default_author: Some("Chungah Rhee"),
    ..SiteProfile::BASE
};
