use super::selectors::element_text;
use super::{Extractor, ParsingContext};
use crate::error::ExtractError;
use crate::model::Recipe;
use crate::normalize::non_empty;
use log::debug;
use scraper::{ElementRef, Html, Selector};

/// Reads `itemscope`/`itemprop` Recipe markup.
pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let selector = Selector::parse("[itemscope][itemtype]").ok()?;
        document.select(&selector).find(|element| {
            element.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
    }

    /// Itemprops of `root` itself. Properties of nested items (an author
    /// Person, nutrition, reviews) belong to those items and are skipped.
    fn props<'a>(&self, root: ElementRef<'a>, prop: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(&format!("[itemprop='{prop}']")) {
            Ok(selector) => root
                .select(&selector)
                .filter(|element| {
                    owning_item(*element).is_some_and(|item| item.id() == root.id())
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Value of an itemprop: `content`, then `src`/`href`, then the text.
    fn prop_value(&self, element: ElementRef) -> Option<String> {
        let value = element.value();
        value
            .attr("content")
            .or_else(|| value.attr("src"))
            .or_else(|| if value.name() == "a" { value.attr("href") } else { None })
            .and_then(non_empty)
            .or_else(|| non_empty(&element_text(element)))
    }

    fn first_prop(&self, root: ElementRef, prop: &str) -> Option<String> {
        self.props(root, prop)
            .into_iter()
            .find_map(|element| self.prop_value(element))
    }

    fn prop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        self.props(root, prop)
            .into_iter()
            .filter_map(|element| self.prop_value(element))
            .collect()
    }
}

/// Nearest `itemscope` ancestor of an element.
fn owning_item(element: ElementRef) -> Option<ElementRef> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().attr("itemscope").is_some())
}

impl Extractor for MicroDataExtractor {
    fn name(&self) -> &str {
        "microdata"
    }

    fn can_handle(&self, _url: &str) -> bool {
        true
    }

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ExtractError> {
        debug!("Attempting to extract recipe using MicroData extractor");

        // Unscoped itemprop lookups pick up site chrome (site name, author bios),
        // so a Recipe container is mandatory.
        let container = self
            .find_recipe_container(&context.document)
            .ok_or(ExtractError::NoStructuredData)?;

        let mut recipe = Recipe::new(&context.url);
        recipe.title = self.first_prop(container, "name").unwrap_or_default();

        recipe.author = self.props(container, "author").into_iter().find_map(|author| {
            self.first_prop(author, "name")
                .or_else(|| self.prop_value(author))
        });
        recipe.image_url = self.first_prop(container, "image");
        recipe.prep_time = self.first_prop(container, "prepTime");
        recipe.cook_time = self.first_prop(container, "cookTime");
        recipe.total_time = self.first_prop(container, "totalTime");
        recipe.servings = self.first_prop(container, "recipeYield");

        let mut ingredients = self.prop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            ingredients = self.prop_list(container, "ingredients");
        }
        recipe.set_ingredients(ingredients);

        let mut steps = self.prop_list(container, "recipeInstructions");
        if steps.is_empty() {
            steps = self.prop_list(container, "instructions");
        }
        recipe.set_instructions(steps);

        if let Some(description) = self.first_prop(container, "description") {
            recipe.notes.push(description);
        }
        if let Some(keywords) = self.first_prop(container, "keywords") {
            recipe.add_tags(keywords.split([',', ';']));
        }
        recipe.add_tags(self.prop_list(container, "recipeCategory"));

        if recipe.ingredients.is_empty() && recipe.instructions.is_empty() {
            return Err(ExtractError::NoContent(
                "MicroData Recipe container has no ingredients or instructions".to_string(),
            ));
        }

        Ok(recipe)
    }
}
