use recipe_extract::extractors::Registry;
use recipe_extract::{extract_recipe, ExtractError, ExtractionFailure};

#[test]
fn test_registration_order_is_documented_order() {
    let registry = Registry::with_default_sites();
    assert_eq!(
        registry.strategy_names(),
        vec![
            "smittenkitchen",
            "foodnetwork",
            "nytcooking",
            "allrecipes",
            "loveandlemons",
            "food52",
            "epicurious",
            "washingtonpost",
            "foodandwine",
            "damndelicious",
            "seriouseats",
            "alexandracooks",
        ]
    );
}

#[test]
fn test_first_registered_strategy_wins_on_overlap() {
    let registry = Registry::with_default_sites();
    let url = "https://smittenkitchen.com/2024/05/pasta/?via=food52.com";
    for _ in 0..5 {
        assert_eq!(registry.resolve(url).unwrap().name(), "smittenkitchen");
    }
    assert_eq!(
        registry.resolve("https://FOOD52.com/recipes/123-soup").unwrap().name(),
        "food52"
    );
}

#[test]
fn test_washington_post_only_claims_food_urls() {
    let registry = Registry::with_default_sites();
    assert!(registry
        .resolve("https://www.washingtonpost.com/politics/2024/01/01/story/")
        .is_none());
    assert_eq!(
        registry
            .resolve("https://www.washingtonpost.com/food/2024/01/01/lemon-tart/")
            .unwrap()
            .name(),
        "washingtonpost"
    );
    assert_eq!(
        registry
            .resolve("https://www.washingtonpost.com/recipes/lemon-tart/")
            .unwrap()
            .name(),
        "washingtonpost"
    );
}

#[test]
fn test_food_network_selector_fallback() {
    let html = r#"
        <html><head><title>Baked Ziti Recipe | Food Network</title></head>
        <body>
            <h1 class="o-AssetTitle__a-HeadlineText"><span>Baked Ziti</span></h1>
            <div class="o-Ingredients">
                <span class="o-Ingredients__a-Ingredient--CheckboxLabel">Deselect All</span>
                <span class="o-Ingredients__a-Ingredient--CheckboxLabel">1 pound ziti</span>
                <span class="o-Ingredients__a-Ingredient--CheckboxLabel">1 jar marinara sauce</span>
            </div>
            <div class="o-Method"><ol>
                <li class="o-Method__m-Step">Boil the ziti.</li>
                <li class="o-Method__m-Step">Bake with the sauce.</li>
            </ol></div>
            <span class="o-RecipeInfo__a-Description--Total">1 hr</span>
        </body></html>
    "#;

    let recipe = extract_recipe(html, "https://www.foodnetwork.com/recipes/baked-ziti").unwrap();
    assert_eq!(recipe.title, "Baked Ziti");
    assert_eq!(recipe.author.as_deref(), Some("Food Network"));
    let ingredients: Vec<&str> = recipe.ingredients.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(ingredients, vec!["1 pound ziti", "1 jar marinara sauce"]);
    assert_eq!(recipe.instructions.len(), 2);
    assert_eq!(recipe.total_time.as_deref(), Some("1 hr"));
}

#[test]
fn test_error_page_failure_is_typed() {
    let html = r#"
        <html><head><title>Food52</title></head>
        <body><h1>Oops</h1><p>Apologies, that page cannot be found.</p></body></html>
    "#;

    let failure = extract_recipe(html, "https://food52.com/recipes/missing").unwrap_err();
    match &failure {
        ExtractionFailure::StrategyThrew {
            strategy, source, ..
        } => {
            assert_eq!(strategy, "food52");
            assert!(matches!(source, ExtractError::PageNotFound { site: "food52", .. }));
        }
        other => panic!("expected StrategyThrew, got {other:?}"),
    }
    assert!(failure.diagnostics().is_some());
}

#[test]
fn test_error_page_empty_record_is_no_match() {
    let html = r#"
        <html><head>
            <title>Page Not Found</title>
            <link rel="canonical" href="https://www.allrecipes.com/404">
        </head>
        <body><h1>Page Not Found</h1><ul><li>Recipes</li><li>Ingredients</li></ul></body></html>
    "#;

    let failure = extract_recipe(html, "https://www.allrecipes.com/recipe/1/gone/").unwrap_err();
    assert_eq!(failure.stage(), "NoMatchingStrategy");
    assert!(failure.partial_recipe().is_none());
    assert!(failure.validation().is_none());
    assert!(failure.diagnostics().is_some());
}

#[test]
fn test_default_author_alone_is_no_match() {
    let html = "<html><body><p>nothing here</p></body></html>";

    let failure = extract_recipe(html, "https://smittenkitchen.com/2020/01/x/").unwrap_err();
    assert_eq!(failure.stage(), "NoMatchingStrategy");
    assert!(failure.partial_recipe().is_none());
}

#[test]
fn test_partial_site_record_fails_validation() {
    let html = r#"
        <html><body>
            <h1 class="entry-title">Marble Cake</h1>
            <div class="entry-content"><p>We are still testing this one.</p></div>
        </body></html>
    "#;

    let url = "https://smittenkitchen.com/2020/02/marble-cake/";
    let failure = extract_recipe(html, url).unwrap_err();
    assert_eq!(failure.stage(), "ValidationFailed");
    assert_eq!(failure.partial_recipe().unwrap().title, "Marble Cake");
    assert_eq!(
        failure.validation().unwrap().missing_fields,
        vec!["ingredients", "instructions"]
    );
}

#[test]
fn test_rejected_record_is_rescued_by_microdata() {
    let html = r#"
        <html><body>
            <h1>Spring Pea Soup</h1>
            <h2>Ingredients</h2>
            <ul><li>2 cups peas</li><li>1 shallot</li></ul>
            <div itemscope itemtype="https://schema.org/Recipe">
                <meta itemprop="name" content="Spring Pea Soup">
                <meta itemprop="recipeIngredient" content="2 cups peas">
                <meta itemprop="recipeIngredient" content="1 shallot">
                <meta itemprop="recipeInstructions" content="Sweat the shallot.">
                <meta itemprop="recipeInstructions" content="Simmer the peas and blend.">
            </div>
        </body></html>
    "#;

    let registry = Registry::with_default_sites();
    let found = registry
        .run(html, "https://food52.com/recipes/spring-pea-soup")
        .unwrap();
    assert_eq!(found.strategy, "microdata");
    assert_eq!(found.recipe.title, "Spring Pea Soup");
    assert_eq!(found.recipe.instructions[1].text, "Simmer the peas and blend.");
}

#[test]
fn test_unmatched_locator_uses_generic_pass() {
    let html = r#"
        <html><head><title>Weekend Baking</title></head><body>
            <h1>Buttermilk Biscuits</h1>
            <ul>
                <li>2 cups flour</li>
                <li>1 tbsp baking powder</li>
                <li>1 cup buttermilk</li>
            </ul>
            <ol>
                <li>Cut the cold butter into the flour.</li>
                <li>Stir in the buttermilk until just combined.</li>
                <li>Bake at 450F for 12 minutes.</li>
            </ol>
        </body></html>
    "#;

    let registry = Registry::with_default_sites();
    assert!(registry.resolve("https://weekend.example.net/biscuits").is_none());

    let found = registry
        .run(html, "https://weekend.example.net/biscuits")
        .unwrap();
    assert_eq!(found.strategy, "html-class");
    assert_eq!(found.recipe.title, "Buttermilk Biscuits");
    assert_eq!(found.recipe.ingredients.len(), 3);
    assert_eq!(found.recipe.instructions.len(), 3);
}
