//! Page profiling for failed (or explicitly requested) extractions.
//!
//! A [`DiagnosticBundle`] describes the page's structure, the places where
//! ingredient and step lists probably live, what structured metadata the page
//! carries, and what a fresh extraction attempt produced. It is meant for a
//! human or an offline process extending the publisher profiles, so building
//! one never fails: extraction errors end up inside the bundle.

use crate::config::DiagnosticsConfig;
use crate::error::ExtractionFailure;
use crate::extractors::json_ld::{decode_scripts, locate_recipe, NodeShape, SCRIPT_SELECTOR};
use crate::extractors::selectors::{element_text, select};
use crate::extractors::Registry;
use crate::model::Recipe;
use crate::validation::ValidationResult;
use chrono::{DateTime, Utc};
use log::{debug, info};
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Instant;

const INGREDIENT_FRAGMENTS: &[&str] = &["ingredient", "recipe-ingredient", "ingredients"];
const STEP_FRAGMENTS: &[&str] = &[
    "instruction",
    "direction",
    "step",
    "method",
    "recipe-instruction",
];
const STRUCTURE_FRAGMENTS: &[&str] = &["recipe", "ingredient", "instruction", "step"];
const RECIPE_KEYWORDS: &[&str] = &[
    "recipe",
    "ingredient",
    "instruction",
    "step",
    "cup",
    "tablespoon",
    "teaspoon",
    "oven",
    "bake",
    "cook",
    "prep",
    "serve",
];
const NON_VISIBLE: &[&str] = &["script", "style", "noscript", "template"];

const MAX_TIME_INDICATORS: usize = 5;
const MAX_SERVING_INDICATORS: usize = 3;
const MAX_HEADINGS: usize = 10;
const MAX_CLASS_NAMES: usize = 20;
const MAX_IDS: usize = 10;
const HEADING_CHARS: usize = 100;
const INDICATOR_CHARS: usize = 100;

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(prep time|cook time|total time|active time|inactive time)\s*:?\s*([\d\w\s,:]+)",
    )
    .expect("valid regex")
});

static SERVING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(serves?|yields?|makes?|portions?)\s*:?\s*(\d+[\w\s]*)").expect("valid regex")
});

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticBundle {
    pub page_analysis: PageAnalysis,
    pub extraction_result: ExtractionReport,
    pub structured_metadata_analysis: StructuredMetadataAnalysis,
    pub timestamp: DateTime<Utc>,
    pub capture_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub url: String,
    pub hostname: String,
    pub title: String,
    pub metrics: PageMetrics,
    pub recipe_indicators: RecipeIndicators,
    pub dom_structure_sample: DomStructureSample,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetrics {
    pub total_elements: usize,
    pub text_length: usize,
    pub headings: HeadingCounts,
    pub lists: ListCounts,
    pub images: usize,
    pub links: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCounts {
    pub ul: usize,
    pub ol: usize,
    pub li: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIndicators {
    pub json_ld_scripts: usize,
    /// How many of the fixed recipe keywords occur in the visible text.
    pub recipe_keywords: usize,
    pub potential_ingredient_containers: Vec<CandidateContainer>,
    pub potential_step_containers: Vec<CandidateContainer>,
    pub time_indicators: Vec<TextIndicator>,
    pub serving_indicators: Vec<TextIndicator>,
}

/// An element that looks like it holds an ingredient or step list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateContainer {
    /// Attribute pattern that matched, e.g. `[class*="ingredient"]`.
    pub selector: String,
    pub element: String,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    pub sample: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextIndicator {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub context: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomStructureSample {
    pub heading_texts: Vec<HeadingSample>,
    pub class_names: Vec<String>,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadingSample {
    pub tag: String,
    pub text: String,
}

/// What a fresh run of the fallback chain produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Recipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    pub analysis: ExtractionAnalysis,
    pub extraction_time_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionAnalysis {
    pub found_title: bool,
    pub found_ingredients: bool,
    pub found_steps: bool,
    pub ingredient_count: usize,
    pub step_count: usize,
    pub source: String,
}

impl ExtractionAnalysis {
    fn of(recipe: &Recipe) -> Self {
        Self {
            found_title: !recipe.title.is_empty(),
            found_ingredients: !recipe.ingredients.is_empty(),
            found_steps: !recipe.instructions.is_empty(),
            ingredient_count: recipe.ingredients.len(),
            step_count: recipe.instructions.len(),
            source: recipe.source.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredMetadataAnalysis {
    pub script_count: usize,
    pub recipes: Vec<RecipeNodeSummary>,
    pub other_types: Vec<OtherNode>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeNodeSummary {
    pub script_index: usize,
    pub shape: NodeShape,
    pub name: String,
    pub has_ingredients: bool,
    pub has_instructions: bool,
    pub ingredient_count: usize,
    pub instruction_count: usize,
}

/// A decoded node of some other type, or a block that failed to decode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherNode {
    pub script_index: usize,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Profiles `content` and re-runs `registry` over it.
pub fn capture(
    registry: &Registry,
    config: &DiagnosticsConfig,
    content: &str,
    url: &str,
) -> DiagnosticBundle {
    let started = Instant::now();
    let document = Html::parse_document(content);

    let page_analysis = analyze_page(&document, config, url);
    let extraction_result = run_extraction(registry, content, url);
    let structured_metadata_analysis = analyze_structured_metadata(&document);

    let bundle = DiagnosticBundle {
        page_analysis,
        extraction_result,
        structured_metadata_analysis,
        timestamp: Utc::now(),
        capture_time_ms: elapsed_ms(started),
    };
    info!(
        "Diagnostics captured for {} in {}ms (success: {})",
        url, bundle.capture_time_ms, bundle.extraction_result.success
    );
    bundle
}

fn analyze_page(document: &Html, config: &DiagnosticsConfig, url: &str) -> PageAnalysis {
    let text = visible_text(document);
    let lowered = text.to_lowercase();

    let mut ingredients = find_containers(document, INGREDIENT_FRAGMENTS, config);
    let mut steps = find_containers(document, STEP_FRAGMENTS, config);
    let ingredient_cap = config
        .max_candidates
        .saturating_sub(steps.len().min(config.max_candidates / 2));
    ingredients.truncate(ingredient_cap);
    steps.truncate(config.max_candidates - ingredients.len());

    PageAnalysis {
        url: url.to_string(),
        hostname: reqwest::Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
            .unwrap_or_default(),
        title: select(document, "title")
            .first()
            .map(|title| element_text(*title).trim().to_string())
            .unwrap_or_default(),
        metrics: PageMetrics {
            total_elements: count(document, "*"),
            text_length: text.chars().count(),
            headings: HeadingCounts {
                h1: count(document, "h1"),
                h2: count(document, "h2"),
                h3: count(document, "h3"),
            },
            lists: ListCounts {
                ul: count(document, "ul"),
                ol: count(document, "ol"),
                li: count(document, "li"),
            },
            images: count(document, "img"),
            links: count(document, "a"),
        },
        recipe_indicators: RecipeIndicators {
            json_ld_scripts: count(document, SCRIPT_SELECTOR),
            recipe_keywords: RECIPE_KEYWORDS
                .iter()
                .filter(|keyword| lowered.contains(*keyword))
                .count(),
            potential_ingredient_containers: ingredients,
            potential_step_containers: steps,
            time_indicators: indicators(&TIME_PATTERN, &text, MAX_TIME_INDICATORS),
            serving_indicators: indicators(&SERVING_PATTERN, &text, MAX_SERVING_INDICATORS),
        },
        dom_structure_sample: sample_structure(document),
    }
}

fn run_extraction(registry: &Registry, content: &str, url: &str) -> ExtractionReport {
    let started = Instant::now();
    let outcome = registry.run(content, url);
    let extraction_time_ms = elapsed_ms(started);

    match outcome {
        Ok(extraction) => ExtractionReport {
            success: true,
            strategy: Some(extraction.strategy),
            analysis: ExtractionAnalysis::of(&extraction.recipe),
            data: Some(extraction.recipe),
            error: None,
            stage: None,
            validation: None,
            extraction_time_ms,
        },
        Err(failure) => {
            debug!("Diagnostics: extraction failed at {}: {}", failure.stage(), failure);
            let strategy = match &failure {
                ExtractionFailure::StrategyThrew { strategy, .. } => Some(strategy.clone()),
                _ => None,
            };
            let analysis = match failure.partial_recipe() {
                Some(recipe) => ExtractionAnalysis::of(recipe),
                None => ExtractionAnalysis {
                    source: url.to_string(),
                    ..ExtractionAnalysis::default()
                },
            };
            ExtractionReport {
                success: false,
                strategy,
                data: failure.partial_recipe().cloned(),
                error: Some(failure.to_string()),
                stage: Some(failure.stage()),
                validation: failure.validation().cloned(),
                analysis,
                extraction_time_ms,
            }
        }
    }
}

fn analyze_structured_metadata(document: &Html) -> StructuredMetadataAnalysis {
    let mut analysis = StructuredMetadataAnalysis::default();

    for (script_index, decoded) in decode_scripts(document).into_iter().enumerate() {
        analysis.script_count += 1;
        let value = match decoded {
            Ok(value) => value,
            Err(e) => {
                debug!("Diagnostics: script {} failed to decode: {}", script_index, e);
                analysis.other_types.push(OtherNode {
                    script_index,
                    node_type: None,
                    error: Some("JSON parsing failed".to_string()),
                });
                continue;
            }
        };

        if let Some((shape, node)) = locate_recipe(&value) {
            analysis.recipes.push(RecipeNodeSummary {
                script_index,
                shape,
                name: node
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("No name")
                    .to_string(),
                has_ingredients: present(node, "recipeIngredient") || present(node, "ingredients"),
                has_instructions: present(node, "recipeInstructions"),
                ingredient_count: entry_count(
                    node.get("recipeIngredient").or_else(|| node.get("ingredients")),
                ),
                instruction_count: entry_count(node.get("recipeInstructions")),
            });
            continue;
        }

        let items: Vec<&Value> = match &value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(map) => match map.get("@graph").and_then(Value::as_array) {
                Some(graph) => graph.iter().collect(),
                None => vec![&value],
            },
            _ => Vec::new(),
        };
        for node_type in items.into_iter().filter_map(|item| item.get("@type")) {
            analysis.other_types.push(OtherNode {
                script_index,
                node_type: Some(node_type.clone()),
                error: None,
            });
        }
    }

    analysis
}

fn present(node: &Value, key: &str) -> bool {
    node.get(key).is_some_and(|value| !value.is_null())
}

fn entry_count(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Null) | None => 0,
        Some(_) => 1,
    }
}

/// Elements whose class, id or `data-testid` contains one of `fragments`
/// and which hold at least one list item.
fn find_containers(
    document: &Html,
    fragments: &[&str],
    config: &DiagnosticsConfig,
) -> Vec<CandidateContainer> {
    let mut found = Vec::new();

    for fragment in fragments {
        for attribute in ["class", "id", "data-testid"] {
            let pattern = format!("[{attribute}*=\"{fragment}\"]");
            for element in select(document, &pattern) {
                let items = select_within(element, "li");
                if items.is_empty() {
                    continue;
                }
                let value = element.value().attr(attribute).map(str::to_string);
                found.push(CandidateContainer {
                    selector: pattern.clone(),
                    element: element.value().name().to_string(),
                    item_count: items.len(),
                    class_name: value.clone().filter(|_| attribute == "class"),
                    id: value.clone().filter(|_| attribute == "id"),
                    test_id: value.filter(|_| attribute == "data-testid"),
                    sample: items
                        .iter()
                        .take(config.samples_per_candidate)
                        .map(|item| truncate(element_text(*item).trim(), config.sample_chars))
                        .collect(),
                });
                if found.len() >= config.max_candidates {
                    return found;
                }
            }
        }
    }

    found
}

fn sample_structure(document: &Html) -> DomStructureSample {
    let heading_texts = select(document, "h1, h2, h3")
        .into_iter()
        .take(MAX_HEADINGS)
        .map(|heading| HeadingSample {
            tag: heading.value().name().to_string(),
            text: truncate(element_text(heading).trim(), HEADING_CHARS),
        })
        .collect();

    let mut seen = BTreeSet::new();
    let mut class_names = Vec::new();
    for class in select(document, "[class]")
        .into_iter()
        .flat_map(|element| element.value().classes())
    {
        if class_names.len() >= MAX_CLASS_NAMES {
            break;
        }
        if is_structural(class) && seen.insert(class) {
            class_names.push(class.to_string());
        }
    }

    let ids = select(document, "[id]")
        .into_iter()
        .filter_map(|element| element.value().id())
        .filter(|id| is_structural(id))
        .take(MAX_IDS)
        .map(str::to_string)
        .collect();

    DomStructureSample {
        heading_texts,
        class_names,
        ids,
    }
}

fn is_structural(name: &str) -> bool {
    STRUCTURE_FRAGMENTS.iter().any(|fragment| name.contains(fragment))
}

fn indicators(pattern: &Regex, text: &str, limit: usize) -> Vec<TextIndicator> {
    pattern
        .captures_iter(text)
        .take(limit)
        .map(|captures| TextIndicator {
            kind: captures[1].to_string(),
            value: truncate(captures[2].trim(), INDICATOR_CHARS),
            context: truncate(&captures[0], INDICATOR_CHARS),
        })
        .collect()
}

/// Body text without script and style contents.
fn visible_text(document: &Html) -> String {
    let Some(body) = select(document, "body").into_iter().next() else {
        return String::new();
    };

    let mut parts = Vec::new();
    for node in body.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| NON_VISIBLE.contains(&name));
        if !hidden {
            parts.push(&**text);
        }
    }
    parts.join(" ")
}

fn select_within<'a>(element: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match scraper::Selector::parse(selector) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn count(document: &Html, selector: &str) -> usize {
    select(document, selector).len()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
