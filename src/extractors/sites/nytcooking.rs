use crate::extractors::selectors::Probe;
use crate::extractors::{SiteProbes, SiteProfile};

pub static NYT_COOKING: SiteProfile = SiteProfile {
    name: "nytcooking",
    hosts: &["cooking.nytimes.com"],
    probes: SiteProbes {
        title: &[
            Probe::Css("h1.recipe-title"),
            Probe::Css("h1[data-testid='recipe-title']"),
            Probe::Css("h1.pantry-recipe-title"),
            Probe::Css("h1"),
        ],
        author: &[
            Probe::Css(".recipe-author"),
            Probe::Css("[data-testid='recipe-author']"),
            Probe::Css(".byline-author"),
            Probe::Css(".author"),
        ],
        ingredients: &[
            Probe::Css("[data-testid='IngredientList'] li"),
            Probe::Css(".recipe-ingredients li"),
            Probe::Css(".ingredients-section li"),
            Probe::Css("[data-module='Ingredients'] li"),
            Probe::Css("ul[data-testid='ingredients'] li"),
        ],
        instructions: &[
            Probe::Css("[data-testid='MethodList'] li"),
            Probe::Css(".recipe-instructions li"),
            Probe::Css(".instructions-section li"),
            Probe::Css("[data-module='Instructions'] li"),
            Probe::Css("ol[data-testid='instructions'] li"),
        ],
        image: &[
            Probe::Attr(".recipe-photo img", "src"),
            Probe::Attr("[data-testid='recipe-image'] img", "src"),
        ],
        servings: &[
            Probe::Css("[data-testid='recipe-yield']"),
            Probe::Css(".recipe-yield-value"),
        ],
        total_time: &[
            Probe::Css("[data-testid='recipe-time']"),
            Probe::Css(".recipe-time-yield .total-time"),
        ],
        notes: &[
            Probe::Css("[data-testid='recipe-notes'] p"),
            Probe::Css(".recipe-notes p"),
        ],
        ..SiteProbes::EMPTY
    },
    default_author: Some("NYT Cooking"),
    ..SiteProfile::BASE
};
