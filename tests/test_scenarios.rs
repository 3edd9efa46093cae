use recipe_extract::extractors::Registry;
use recipe_extract::validation::FieldErrorCode;
use recipe_extract::{extract_recipe, validate, ExtractionFailure, Recipe};

fn page_with_json_ld(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#,
        json_ld
    )
}

#[test]
fn test_cookies_from_structured_metadata() {
    let html = page_with_json_ld(
        r#"{
            "@context": "https://schema.org",
            "@type": "Recipe",
            "name": "Chocolate Chip Cookies",
            "recipeIngredient": ["2 cups flour", "1 cup sugar"],
            "recipeInstructions": ["Mix.", {"text": "Bake at 350F."}]
        }"#,
    );

    let recipe = extract_recipe(&html, "https://cookies.example.com/classic").unwrap();
    assert_eq!(recipe.title, "Chocolate Chip Cookies");
    assert_eq!(recipe.source, "https://cookies.example.com/classic");
    assert_eq!(recipe.ingredients.len(), 2);

    let steps: Vec<(u32, &str)> = recipe
        .instructions
        .iter()
        .map(|step| (step.step_number, step.text.as_str()))
        .collect();
    assert_eq!(steps, vec![(1, "Mix."), (2, "Bake at 350F.")]);
}

#[test]
fn test_same_record_through_a_publisher_strategy() {
    let html = page_with_json_ld(
        r#"{
            "@type": "Recipe",
            "name": "Chocolate Chip Cookies",
            "recipeIngredient": ["2 cups flour", "1 cup sugar"],
            "recipeInstructions": ["Mix.", {"text": "Bake at 350F."}]
        }"#,
    );

    let recipe =
        extract_recipe(&html, "https://damndelicious.net/2024/01/01/cookies/").unwrap();
    assert_eq!(recipe.title, "Chocolate Chip Cookies");
    assert_eq!(recipe.author.as_deref(), Some("Chungah Rhee"));
    assert_eq!(recipe.instructions[1].step_number, 2);
}

#[test]
fn test_page_without_recipe_has_no_matching_strategy() {
    let html = r#"
        <html><head><title>About</title></head>
        <body><h1>About this blog</h1><p>We write about travel.</p></body></html>
    "#;

    let registry = Registry::with_default_sites();
    assert!(registry.extract(html, "https://blog.example.org/about").is_none());

    let failure = extract_recipe(html, "https://blog.example.org/about").unwrap_err();
    assert!(matches!(failure, ExtractionFailure::NoMatchingStrategy { .. }));
    assert!(failure.validation().is_none());
}

#[test]
fn test_selector_fallback_without_instructions_fails_validation() {
    let html = r#"
        <html><body>
            <h1 class="entry-title">Weeknight Chili</h1>
            <div class="recipe-card-ingredients">
                <ul><li>1 lb ground beef</li><li>1 can beans</li></ul>
            </div>
        </body></html>
    "#;

    let failure =
        extract_recipe(html, "https://damndelicious.net/2024/02/02/chili/").unwrap_err();
    assert_eq!(failure.stage(), "ValidationFailed");

    let validation = failure.validation().unwrap();
    assert!(!validation.is_valid);
    assert_eq!(validation.missing_fields, vec!["instructions"]);

    let partial = failure.partial_recipe().unwrap();
    assert_eq!(partial.title, "Weeknight Chili");
    assert_eq!(partial.ingredients.len(), 2);
}

#[test]
fn test_overlong_title_is_invalid() {
    let mut recipe = Recipe::new("https://example.com/long");
    recipe.title = "a".repeat(250);
    recipe.set_ingredients(["1 egg"]);
    recipe.set_instructions(["Boil."]);

    let result = validate(&recipe);
    assert!(!result.is_valid);
    assert!(result.missing_fields.is_empty());
    assert_eq!(result.invalid_fields, vec!["title"]);
    assert_eq!(result.field_errors["title"].code, FieldErrorCode::TooLong);
}

#[test]
fn test_overlong_title_from_page_is_reported() {
    let title = "Very ".repeat(60);
    let html = page_with_json_ld(&format!(
        r#"{{"@type": "Recipe", "name": "{}", "recipeIngredient": ["1 egg"],
            "recipeInstructions": ["Boil."]}}"#,
        title
    ));

    let failure = extract_recipe(&html, "https://example.com/long").unwrap_err();
    let validation = failure.validation().unwrap();
    assert_eq!(validation.invalid_fields, vec!["title"]);

    let json = serde_json::to_value(validation).unwrap();
    assert_eq!(json["fieldErrors"]["title"]["code"], "TOO_LONG");
}

#[test]
fn test_extracted_text_is_normalized() {
    let html = page_with_json_ld(
        r#"{
            "@type": "Recipe",
            "name": "Mac &amp; Cheese&#8203;",
            "recipeIngredient": ["  1&#189; cups   macaroni ", "2 cups cheddar&nbsp;cheese"],
            "recipeInstructions": ["Boil pasta&#8211;8 minutes.", "   ", "Stir in cheese&hellip;"]
        }"#,
    );

    let recipe = extract_recipe(&html, "https://example.com/mac").unwrap();
    assert_eq!(recipe.title, "Mac & Cheese");
    assert_eq!(recipe.ingredients[0].text, "1½ cups macaroni");
    assert_eq!(recipe.ingredients[1].text, "2 cups cheddar cheese");
    assert_eq!(recipe.instructions.len(), 2);
    assert_eq!(recipe.instructions[0].text, "Boil pasta–8 minutes.");
    assert_eq!(recipe.instructions[1].step_number, 2);
    assert_eq!(recipe.instructions[1].text, "Stir in cheese…");
}
