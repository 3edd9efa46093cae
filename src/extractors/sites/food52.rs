use crate::extractors::selectors::Probe;
use crate::extractors::site::body_contains;
use crate::extractors::{IncompletePolicy, PageMissing, ParsingContext, SiteProbes, SiteProfile};

pub static FOOD52: SiteProfile = SiteProfile {
    name: "food52",
    hosts: &["food52.com"],
    probes: SiteProbes {
        title: &[Probe::Css("h1")],
        author: &[Probe::Css("a[href*='/author/']")],
        ingredients: &[
            Probe::AfterHeading {
                heading: "h2",
                keyword: "ingredients",
                list: "ul",
            },
            Probe::Css(".recipe__list--ingredients li"),
        ],
        instructions: &[
            Probe::AfterHeading {
                heading: "h2",
                keyword: "directions",
                list: "ul",
            },
            Probe::AfterHeading {
                heading: "h2",
                keyword: "directions",
                list: "ol",
            },
            Probe::Css(".recipe__list--steps li"),
        ],
        image: &[
            Probe::Attr("meta[property='og:image']", "content"),
            Probe::Attr("img", "src"),
        ],
        tags: &[Probe::Css("span.text-approved, .tags")],
        ..SiteProbes::EMPTY
    },
    on_incomplete: IncompletePolicy::Reject,
    page_missing: Some((is_error_page, PageMissing::Fail)),
    ..SiteProfile::BASE
};

fn is_error_page(context: &ParsingContext) -> bool {
    body_contains(context, &["Apologies, that page cannot be found."])
}
