use recipe_extract::extract_recipe;
use recipe_extract::extractors::{
    extract_structured_recipe, Extractor, JsonLdExtractor, ParsingContext,
};
use scraper::Html;

fn document(json_ld: &str) -> Html {
    Html::parse_document(&format!(
        r#"<html><head><script type="application/ld+json">{}</script></head><body></body></html>"#,
        json_ld
    ))
}

#[test]
fn test_type_array_with_other_types() {
    let doc = document(
        r#"{"@type": ["Recipe", "NewsArticle"], "name": "Tagged",
            "recipeIngredient": ["1 egg"], "recipeInstructions": ["Fry."]}"#,
    );
    let node = extract_structured_recipe(&doc).unwrap();
    assert_eq!(node["name"], "Tagged");
}

#[test]
fn test_recipe_nested_in_graph() {
    let doc = document(
        r#"{"@context": "https://schema.org", "@graph": [
            {"@type": "Organization", "name": "Publisher"},
            {"@type": ["Recipe"], "name": "Graph Soup"}
        ]}"#,
    );
    let node = extract_structured_recipe(&doc).unwrap();
    assert_eq!(node["name"], "Graph Soup");
}

#[test]
fn test_plain_type_string() {
    let doc = document(r#"{"@type": "Recipe", "name": "Plain"}"#);
    assert_eq!(extract_structured_recipe(&doc).unwrap()["name"], "Plain");
}

#[test]
fn test_first_recipe_in_top_level_array() {
    let doc = document(
        r#"[{"@type": "BreadcrumbList"}, {"@type": "Recipe", "name": "First"},
            {"@type": "Recipe", "name": "Second"}]"#,
    );
    assert_eq!(extract_structured_recipe(&doc).unwrap()["name"], "First");
}

#[test]
fn test_case_insensitive_and_prefixed_types() {
    let types = [
        r#""recipe""#,
        r#""RECIPE""#,
        r#""schema:Recipe""#,
        r#""http://schema.org/Recipe""#,
    ];
    for type_value in types {
        let doc = document(&format!(r#"{{"@type": {}, "name": "Any"}}"#, type_value));
        assert!(
            extract_structured_recipe(&doc).is_some(),
            "type {type_value} was not recognised"
        );
    }
}

#[test]
fn test_malformed_block_does_not_stop_the_scan() {
    let html = r#"<html><head>
        <script type="application/ld+json">{ "@type": "Recipe", "name": </script>
        <script type="application/ld+json">{"@type": "Recipe", "name": "Second Block"}</script>
        </head><body></body></html>"#;
    let doc = Html::parse_document(html);
    assert_eq!(extract_structured_recipe(&doc).unwrap()["name"], "Second Block");
}

#[test]
fn test_sanitizes_undefined_and_control_characters() {
    let html = "<html><head><script type=\"application/ld+json\">\
        {\"@type\": \"Recipe\", \"name\": \"Tab\tTitle\", \"cookTime\": undefined,\
         \"recipeIngredient\": [\"1 egg\",], \"recipeInstructions\": [\"Fry.\"]}\
        </script></head><body></body></html>";
    let recipe = extract_recipe(html, "https://example.com/tab").unwrap();
    assert_eq!(recipe.title, "Tab Title");
    assert_eq!(recipe.cook_time, None);
    assert_eq!(recipe.ingredients.len(), 1);
}

#[test]
fn test_no_metadata_returns_none() {
    let doc = Html::parse_document("<html><body><h1>Nothing here</h1></body></html>");
    assert!(extract_structured_recipe(&doc).is_none());
}

#[test]
fn test_author_and_image_shapes() {
    let cases = [
        (
            r#""author": "Jane Doe", "image": "https://img.example/a.jpg""#,
            "Jane Doe",
            "https://img.example/a.jpg",
        ),
        (
            r#""author": {"@type": "Person", "name": "Jane Doe"}, "image": {"url": "https://img.example/b.jpg"}"#,
            "Jane Doe",
            "https://img.example/b.jpg",
        ),
        (
            r#""author": [{"name": "Jane Doe"}, {"name": "John Roe"}], "image": ["https://img.example/c.jpg", "https://img.example/d.jpg"]"#,
            "Jane Doe, John Roe",
            "https://img.example/c.jpg",
        ),
        (
            r#""author": ["Jane Doe"], "image": [{"@type": "ImageObject", "url": "https://img.example/e.jpg"}]"#,
            "Jane Doe",
            "https://img.example/e.jpg",
        ),
    ];

    for (fields, author, image) in cases {
        let doc = format!(
            r#"<html><head><script type="application/ld+json">
            {{"@type": "Recipe", "name": "Shapes", {}, "recipeIngredient": ["1 egg"], "recipeInstructions": ["Cook."]}}
            </script></head><body></body></html>"#,
            fields
        );
        let context = ParsingContext::new(&doc, "https://example.com/shapes");
        let recipe = JsonLdExtractor.extract(&context).unwrap();
        assert_eq!(recipe.author.as_deref(), Some(author), "fields: {fields}");
        assert_eq!(recipe.image_url.as_deref(), Some(image), "fields: {fields}");
    }
}

#[test]
fn test_instruction_shapes_are_flattened_in_order() {
    let doc = r#"<html><head><script type="application/ld+json">
    {
        "@type": "Recipe",
        "name": "Layered Cake",
        "recipeIngredient": "3 eggs",
        "recipeInstructions": [
            {"@type": "HowToSection", "name": "Batter", "itemListElement": [
                {"@type": "HowToStep", "text": "Whisk eggs."},
                {"@type": "HowToStep", "name": "Fold in flour."}
            ]},
            "Pour into pans.",
            [{"@type": "HowToStep", "text": "Bake."}],
            {"@type": "HowToStep", "text": "<p>Cool completely.</p>"}
        ]
    }
    </script></head><body></body></html>"#;

    let recipe = extract_recipe(doc, "https://example.com/cake").unwrap();
    let steps: Vec<&str> = recipe.instructions.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        steps,
        vec!["Whisk eggs.", "Fold in flour.", "Pour into pans.", "Bake.", "Cool completely."]
    );
    assert_eq!(recipe.ingredients[0].text, "3 eggs");
    let numbers: Vec<u32> = recipe.instructions.iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_single_string_instructions_split_on_lines() {
    let doc = document(
        r#"{"@type": "Recipe", "name": "Rice", "recipeIngredient": ["1 cup rice"],
            "recipeInstructions": "Rinse the rice.\nSimmer for 18 minutes.\n\nFluff."}"#,
    );
    let context = ParsingContext {
        url: "https://example.com/rice".to_string(),
        document: doc,
    };
    let recipe = JsonLdExtractor.extract(&context).unwrap();
    assert_eq!(recipe.instructions.len(), 3);
    assert_eq!(recipe.instructions[2].text, "Fluff.");
}

#[test]
fn test_yield_keywords_and_description() {
    let doc = document(
        r#"{"@type": "Recipe", "name": "Cookies",
            "recipeYield": ["24", "24 cookies"],
            "keywords": "dessert, baking; chocolate",
            "recipeCategory": ["Dessert", "Snack"],
            "description": "Chewy and rich.",
            "recipeIngredient": ["1 cup flour"], "recipeInstructions": ["Bake."]}"#,
    );
    let context = ParsingContext {
        url: "https://example.com/cookies".to_string(),
        document: doc,
    };
    let recipe = JsonLdExtractor.extract(&context).unwrap();
    assert_eq!(recipe.servings.as_deref(), Some("24 cookies"));
    assert_eq!(recipe.tags, vec!["dessert", "baking", "chocolate", "Snack"]);
    assert_eq!(recipe.notes, vec!["Chewy and rich."]);
}
