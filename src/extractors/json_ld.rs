use super::selectors::{element_text, select};
use super::{Extractor, ParsingContext};
use crate::error::ExtractError;
use crate::model::Recipe;
use crate::normalize::{non_empty, normalize};
use log::debug;
use scraper::Html;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub(crate) const SCRIPT_SELECTOR: &str = "script[type='application/ld+json']";

/// Universal pass over the page's JSON-LD blocks.
pub struct JsonLdExtractor;

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &str {
        "json-ld"
    }

    fn can_handle(&self, _url: &str) -> bool {
        true
    }

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ExtractError> {
        let node = extract_structured_recipe(&context.document).ok_or_else(|| {
            debug!("JsonLdExtractor: No valid recipe found in any JSON-LD script");
            ExtractError::NoStructuredData
        })?;
        Ok(recipe_from_node(&node, &context.url))
    }
}

/// Where a recipe node was found inside a decoded block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Object,
    Array,
    Graph,
}

/// Returns the first recipe-typed node across all JSON-LD blocks, in document order.
///
/// Blocks that fail to decode are logged and skipped.
pub fn extract_structured_recipe(document: &Html) -> Option<Value> {
    let scripts = decode_scripts(document);
    debug!("JsonLdExtractor: Found {} JSON-LD script tags", scripts.len());

    for (index, decoded) in scripts.into_iter().enumerate() {
        match decoded {
            Ok(value) => {
                if let Some((shape, node)) = locate_recipe(&value) {
                    debug!("JsonLdExtractor: Recipe found in script {} ({:?})", index, shape);
                    return Some(node.clone());
                }
                debug!("JsonLdExtractor: No recipe found in script {}", index);
            }
            Err(e) => {
                debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
            }
        }
    }

    None
}

/// Sanitizes and decodes every JSON-LD block of the page.
pub(crate) fn decode_scripts(document: &Html) -> Vec<Result<Value, serde_json::Error>> {
    select(document, SCRIPT_SELECTOR)
        .into_iter()
        .map(|script| {
            let raw: String = script.text().collect();
            serde_json::from_str::<Value>(&sanitize_json(&raw))
        })
        .collect()
}

/// Finds a recipe node as a top-level node, inside a top-level array, or inside `@graph`.
pub fn locate_recipe(value: &Value) -> Option<(NodeShape, &Value)> {
    if is_recipe_type(value) {
        return Some((NodeShape::Object, value));
    }
    if let Some(items) = value.as_array() {
        if let Some(node) = items.iter().find(|item| is_recipe_type(item)) {
            return Some((NodeShape::Array, node));
        }
        return items.iter().find_map(find_in_graph);
    }
    find_in_graph(value)
}

fn find_in_graph(value: &Value) -> Option<(NodeShape, &Value)> {
    match value.get("@graph")? {
        Value::Array(items) => items
            .iter()
            .find(|item| is_recipe_type(item))
            .map(|node| (NodeShape::Graph, node)),
        node if is_recipe_type(node) => Some((NodeShape::Graph, node)),
        _ => None,
    }
}

/// True when `@type` is "Recipe", or an array containing it. Case and
/// schema prefixes (`schema:Recipe`, `http://schema.org/Recipe`) are ignored.
pub fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => names_recipe(kind),
        Some(Value::Array(kinds)) => kinds.iter().filter_map(Value::as_str).any(names_recipe),
        _ => false,
    }
}

fn names_recipe(kind: &str) -> bool {
    kind.rsplit(['/', ':', '#'])
        .next()
        .is_some_and(|name| name.trim().eq_ignore_ascii_case("recipe"))
}

const UNDEFINED: [char; 9] = ['u', 'n', 'd', 'e', 'f', 'i', 'n', 'e', 'd'];

/// Repairs the damage publishers commonly leave in JSON-LD blocks.
///
/// Raw control characters become spaces, bare `undefined` values become
/// `null`, trailing commas before `]`/`}` are dropped and wrapping comment or
/// CDATA markers are removed. String literals are only touched for control
/// characters.
pub fn sanitize_json(raw: &str) -> String {
    let trimmed = raw
        .trim()
        .trim_start_matches("//<![CDATA[")
        .trim_start_matches("<![CDATA[")
        .trim_start_matches("<!--")
        .trim_end_matches("//]]>")
        .trim_end_matches("]]>")
        .trim_end_matches("-->");

    let chars: Vec<char> = trimmed.chars().collect();
    let mut out = String::with_capacity(trimmed.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            if escaped {
                escaped = false;
                out.push(c);
            } else if c == '\\' {
                escaped = true;
                out.push(c);
            } else if c == '"' {
                in_string = false;
                out.push(c);
            } else if c < ' ' {
                out.push(' ');
            } else {
                out.push(c);
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ']' | '}' => {
                let kept = out.trim_end().len();
                out.truncate(kept);
                if out.ends_with(',') {
                    out.pop();
                }
                out.push(c);
            }
            'u' if chars[i..].starts_with(&UNDEFINED)
                && !chars
                    .get(i + UNDEFINED.len())
                    .is_some_and(|next| next.is_alphanumeric() || *next == '_')
                && matches!(out.trim_end().chars().last(), Some(':' | '[' | ',')) =>
            {
                out.push_str("null");
                i += UNDEFINED.len();
                continue;
            }
            c if c < ' ' => out.push(' '),
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

/// Maps a recipe node to a [`Recipe`]. Fields with unexpected shapes are ignored.
pub fn recipe_from_node(node: &Value, url: &str) -> Recipe {
    JsonLdRecipe::deserialize(node)
        .unwrap_or_default()
        .into_recipe(url)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonLdRecipe {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    headline: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    author: Option<OneOrMany<Author>>,
    #[serde(default, deserialize_with = "lenient")]
    image: Option<OneOrMany<ImageRef>>,
    #[serde(default, deserialize_with = "lenient")]
    recipe_ingredient: Option<OneOrMany<IngredientItem>>,
    #[serde(default, deserialize_with = "lenient")]
    ingredients: Option<OneOrMany<IngredientItem>>,
    #[serde(default, deserialize_with = "lenient")]
    recipe_instructions: Option<OneOrMany<InstructionItem>>,
    #[serde(default, deserialize_with = "lenient")]
    recipe_yield: Option<OneOrMany<TextValue>>,
    #[serde(default, deserialize_with = "lenient")]
    prep_time: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    cook_time: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    total_time: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    keywords: Option<OneOrMany<TextValue>>,
    #[serde(default, deserialize_with = "lenient")]
    recipe_category: Option<OneOrMany<TextValue>>,
}

/// Decodes a field on its own so one malformed field cannot sink the whole node.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Number(serde_json::Number),
    Object {
        #[serde(alias = "name", alias = "@value")]
        text: String,
    },
    Other(IgnoredAny),
}

impl TextValue {
    fn into_text(self) -> Option<String> {
        match self {
            TextValue::Text(text) | TextValue::Object { text } => Some(text),
            TextValue::Number(number) => Some(number.to_string()),
            TextValue::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Author {
    Name(String),
    Person { name: String },
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageRef {
    Url(String),
    Object {
        url: Option<OneOrMany<String>>,
        #[serde(rename = "contentUrl")]
        content_url: Option<String>,
    },
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientItem {
    Text(String),
    Object {
        name: String,
        amount: Option<TextValue>,
    },
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionItem {
    Text(String),
    Nested(Vec<InstructionItem>),
    Section {
        #[serde(rename = "itemListElement")]
        item_list_element: OneOrMany<Box<InstructionItem>>,
    },
    Step {
        text: Option<TextValue>,
        name: Option<TextValue>,
    },
    Other(IgnoredAny),
}

impl InstructionItem {
    fn flatten_into(self, steps: &mut Vec<String>) {
        match self {
            InstructionItem::Text(text) => steps.push(strip_markup(&text)),
            InstructionItem::Nested(items) => {
                for item in items {
                    item.flatten_into(steps);
                }
            }
            InstructionItem::Section { item_list_element } => {
                for item in item_list_element.into_vec() {
                    (*item).flatten_into(steps);
                }
            }
            InstructionItem::Step { text, name } => {
                let text = text
                    .and_then(TextValue::into_text)
                    .filter(|t| !t.trim().is_empty())
                    .or_else(|| name.and_then(TextValue::into_text));
                if let Some(text) = text {
                    steps.push(strip_markup(&text));
                }
            }
            InstructionItem::Other(_) => {}
        }
    }
}

impl JsonLdRecipe {
    fn into_recipe(self, url: &str) -> Recipe {
        let mut recipe = Recipe::new(url);

        recipe.title = self
            .name
            .and_then(TextValue::into_text)
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.headline.and_then(TextValue::into_text))
            .map(|t| normalize(&t))
            .unwrap_or_default();

        if let Some(authors) = self.author {
            let names: Vec<String> = authors
                .into_vec()
                .into_iter()
                .filter_map(|author| match author {
                    Author::Name(name) | Author::Person { name } => non_empty(&name),
                    Author::Other(_) => None,
                })
                .collect();
            if !names.is_empty() {
                recipe.author = Some(names.join(", "));
            }
        }

        recipe.image_url = self.image.and_then(|images| {
            images.into_vec().into_iter().find_map(|image| match image {
                ImageRef::Url(url) => non_empty(&url),
                ImageRef::Object { url, content_url } => url
                    .and_then(|urls| urls.into_vec().iter().find_map(|url| non_empty(url)))
                    .or_else(|| content_url.as_deref().and_then(non_empty)),
                ImageRef::Other(_) => None,
            })
        });

        let ingredients = self
            .recipe_ingredient
            .or(self.ingredients)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();
        recipe.set_ingredients(ingredients.into_iter().filter_map(|item| match item {
            IngredientItem::Text(text) => Some(strip_markup(&text)),
            IngredientItem::Object { name, amount } => {
                match amount.and_then(TextValue::into_text).and_then(|a| non_empty(&a)) {
                    Some(amount) => Some(format!("{amount} {name}")),
                    None => Some(name),
                }
            }
            IngredientItem::Other(_) => None,
        }));

        let mut steps = Vec::new();
        match self.recipe_instructions {
            Some(OneOrMany::One(InstructionItem::Text(text))) => {
                steps.extend(text.lines().map(strip_markup));
            }
            Some(instructions) => {
                for item in instructions.into_vec() {
                    item.flatten_into(&mut steps);
                }
            }
            None => {}
        }
        recipe.set_instructions(steps);

        recipe.prep_time = text_field(self.prep_time);
        recipe.cook_time = text_field(self.cook_time);
        recipe.total_time = text_field(self.total_time);

        if let Some(yields) = self.recipe_yield {
            let yields: Vec<String> = yields
                .into_vec()
                .into_iter()
                .filter_map(TextValue::into_text)
                .filter_map(|y| non_empty(&y))
                .collect();
            // Prefer the descriptive entry ("24 cookies") over a bare number
            recipe.servings = yields
                .iter()
                .find(|y| y.contains(char::is_alphabetic))
                .or_else(|| yields.first())
                .cloned();
        }

        if let Some(description) = text_field(self.description) {
            recipe.notes.push(strip_markup(&description));
        }

        if let Some(keywords) = self.keywords {
            for keyword in keywords.into_vec().into_iter().filter_map(TextValue::into_text) {
                recipe.add_tags(keyword.split([',', ';']));
            }
        }
        if let Some(categories) = self.recipe_category {
            recipe.add_tags(
                categories
                    .into_vec()
                    .into_iter()
                    .filter_map(TextValue::into_text),
            );
        }

        recipe
    }
}

fn text_field(value: Option<TextValue>) -> Option<String> {
    value
        .and_then(TextValue::into_text)
        .and_then(|text| non_empty(&text))
}

/// Drops inline markup some publishers leave inside JSON-LD strings.
fn strip_markup(text: &str) -> String {
    if !(text.contains('<') && text.contains('>')) {
        return normalize(text);
    }
    let fragment = Html::parse_fragment(text);
    normalize(&element_text(fragment.root_element()))
}
