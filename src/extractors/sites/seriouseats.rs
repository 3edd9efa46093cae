use crate::extractors::selectors::{collect, Probe};
use crate::extractors::{ParsingContext, SiteProbes, SiteProfile};
use crate::model::Recipe;

pub static SERIOUS_EATS: SiteProfile = SiteProfile {
    name: "seriouseats",
    hosts: &["seriouseats.com"],
    probes: SiteProbes {
        title: &[
            Probe::Css("h1.heading-1"),
            Probe::Css("h1.recipe-title"),
            Probe::Css("h1"),
        ],
        author: &[
            Probe::Css(".recipe-author"),
            Probe::Css(".author-name"),
            Probe::Css("[data-author]"),
            Probe::Css(".by-author"),
        ],
        ingredients: &[
            Probe::Css(".structured-ingredients__list-item"),
            Probe::Css(".recipe-ingredients li"),
            Probe::Css(".ingredients li"),
            Probe::Css(".mntl-structured-ingredients__list-item"),
            Probe::Css(".recipe-ingredient-group li"),
        ],
        instructions: &[
            Probe::Css(".structured-instructions__list-item"),
            Probe::Css(".recipe-instructions li"),
            Probe::Css(".instructions li"),
            Probe::Css(".mntl-sc-block-group--LI .mntl-sc-block"),
            Probe::Css(".recipe-instruction-group li"),
        ],
        image: &[
            Probe::Attr(".recipe-image img", "src"),
            Probe::Attr(".primary-image img", "src"),
            Probe::Attr(".hero-image img", "src"),
        ],
        prep_time: &[Probe::Css(
            ".recipe-prep-time, .prep-time, [data-prep-time], [itemprop='prepTime']",
        )],
        cook_time: &[Probe::Css(
            ".recipe-cook-time, .cook-time, [data-cook-time], [itemprop='cookTime']",
        )],
        total_time: &[Probe::Css(
            ".recipe-total-time, .total-time, [data-total-time], [itemprop='totalTime']",
        )],
        servings: &[Probe::Css(
            ".recipe-servings, .servings, .recipe-yield, [data-servings], [itemprop='recipeYield']",
        )],
        notes: &[Probe::Css(".recipe-notes li, .chef-note, .recipe-tips li")],
        ..SiteProbes::EMPTY
    },
    refine: Some(steps_from_html_blocks),
    ..SiteProfile::BASE
};

/// Long-form recipes put each step in its own rich-text block.
fn steps_from_html_blocks(context: &ParsingContext, recipe: &mut Recipe) {
    if !recipe.instructions.is_empty() {
        return;
    }
    recipe.set_instructions(
        collect(&context.document, &Probe::Css(".mntl-sc-block-html"))
            .into_iter()
            .filter(|text| text.chars().count() > 10),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{Extractor, SiteExtractor};

    #[test]
    fn test_html_blocks_and_notes() {
        let html = r#"<html><body>
            <h1 class="heading-1">The Best Chili</h1>
            <ul><li class="structured-ingredients__list-item">2 pounds beef</li></ul>
            <div class="mntl-sc-block-html">Short.</div>
            <div class="mntl-sc-block-html">Brown the beef in batches.</div>
            <div class="mntl-sc-block-html">Simmer for two hours.</div>
            <ul class="recipe-tips"><li>Make it a day ahead.</li></ul>
        </body></html>"#;
        let recipe = SiteExtractor::new(&SERIOUS_EATS)
            .extract(&ParsingContext::new(
                html,
                "https://www.seriouseats.com/the-best-chili-recipe",
            ))
            .unwrap();
        let steps: Vec<_> = recipe.instructions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            steps,
            vec!["Brown the beef in batches.", "Simmer for two hours."]
        );
        assert_eq!(recipe.notes, vec!["Make it a day ahead."]);
    }
}
