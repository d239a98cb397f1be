use recipe_keeper::{
    scrape_recipe, ExtractionError, FetchError, HoursMinutes, ImageRef, ImportError,
    NormalizationError, RecipeContent, RequiredField,
};

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {json_ld}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#
    )
}

async fn serve(server: &mut mockito::Server, body: String) -> mockito::Mock {
    server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_scrape_pancakes() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@context": "https://schema.org/",
        "@type": "Recipe",
        "name": "Pancakes",
        "description": "Sunday breakfast",
        "recipeIngredient": ["flour", "egg"],
        "recipeInstructions": ["mix", "cook"],
        "totalTime": "PT20M"
    }
    "#;
    let _m = serve(&mut server, create_recipe_html(json_ld)).await;

    let url = format!("{}/recipe", server.url());
    let recipe = scrape_recipe(&url, "user-1", "recipe-1").await.unwrap();

    assert_eq!(recipe.recipe_id, "recipe-1");
    assert_eq!(recipe.user_id, "user-1");
    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.description, "Sunday breakfast");
    assert_eq!(
        recipe.ingredients,
        RecipeContent::List(vec!["flour".to_string(), "egg".to_string()])
    );
    assert_eq!(
        recipe.instructions,
        RecipeContent::List(vec!["mix".to_string(), "cook".to_string()])
    );
    assert_eq!(recipe.times.total, HoursMinutes::new(0, 20));
    assert_eq!(recipe.times.prep, HoursMinutes::new(0, 0));
    assert!(!recipe.is_favorite);
}

#[tokio::test]
async fn test_scrape_full_metadata_with_sections() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@type": "Recipe",
        "author": {"@type": "Person", "name": "Bianca Zapatka"},
        "cookTime": "PT25M",
        "prepTime": "PT20M",
        "totalTime": "PT45M",
        "description": "Saftige Schokoladen-Brownies treffen auf knusprige Chocolate Chip Cookies",
        "image": [
            "https://example.com/cookie-brownies.jpg",
            "https://example.com/cookie-brownies-500x500.jpg"
        ],
        "name": "Vegane Brookies",
        "recipeYield": ["15", "15 Stück"],
        "recipeIngredient": ["160 g Mehl", "30 g Kakaopulver", "1  Prise Salz"],
        "recipeInstructions": [
            {
                "@type": "HowToSection",
                "name": "Brownie-Teig",
                "itemListElement": [
                    {"@type": "HowToStep", "text": "Den Backofen vorheizen."},
                    {"@type": "HowToStep", "text": "Mehl und Kakao mischen."}
                ]
            },
            {
                "@type": "HowToSection",
                "name": "Cookie-Teig",
                "itemListElement": [
                    {"@type": "HowToStep", "text": "Butter schmelzen."}
                ]
            }
        ]
    }
    "#;
    let _m = serve(&mut server, create_recipe_html(json_ld)).await;

    let url = format!("{}/recipe", server.url());
    let recipe = scrape_recipe(&url, "u", "r").await.unwrap();

    assert_eq!(recipe.author.as_deref(), Some("Bianca Zapatka"));
    assert_eq!(recipe.recipe_yield.as_deref(), Some("15 Stück"));
    assert_eq!(
        recipe.image,
        Some(ImageRef::Url(
            "https://example.com/cookie-brownies.jpg".to_string()
        ))
    );
    assert_eq!(recipe.times.prep, HoursMinutes::new(0, 20));
    assert_eq!(recipe.times.cook, HoursMinutes::new(0, 25));
    assert_eq!(recipe.times.total, HoursMinutes::new(0, 45));

    match recipe.instructions {
        RecipeContent::Grouped(groups) => {
            assert_eq!(groups.len(), 2);
            assert_eq!(groups[0].name.as_deref(), Some("Brownie-Teig"));
            assert_eq!(groups[0].items.len(), 2);
            assert_eq!(groups[1].items, vec!["Butter schmelzen.".to_string()]);
        }
        other => panic!("expected grouped instructions, got {other:?}"),
    }
}

#[tokio::test]
async fn test_scrape_recipe_inside_graph() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@context": "https://schema.org",
        "@graph": [
            {"@type": "WebPage", "name": "Some page"},
            {
                "@type": "Recipe",
                "name": "Graph Soup",
                "description": "From a Yoast graph",
                "author": [{"@id": "https://example.com/#/schema/person/1"}],
                "recipeIngredient": ["water"],
                "recipeInstructions": "Boil."
            }
        ]
    }
    "#;
    let _m = serve(&mut server, create_recipe_html(json_ld)).await;

    let url = format!("{}/recipe", server.url());
    let recipe = scrape_recipe(&url, "u", "r").await.unwrap();

    assert_eq!(recipe.name, "Graph Soup");
    // author given only by reference
    assert!(recipe.author.is_none());
    assert_eq!(recipe.instructions, RecipeContent::Text("Boil.".to_string()));
}

#[tokio::test]
async fn test_page_without_block_fails() {
    let mut server = mockito::Server::new_async().await;
    let html = r#"
        <html><body>
            <h1>Pancakes</h1>
            <ul class="ingredients"><li>flour</li><li>egg</li></ul>
        </body></html>
    "#;
    let _m = serve(&mut server, html.to_string()).await;

    let url = format!("{}/recipe", server.url());
    let err = scrape_recipe(&url, "u", "r").await.unwrap_err();
    assert!(matches!(
        err,
        ImportError::ExtractionError(ExtractionError::NoStructuredBlock)
    ));
}

#[tokio::test]
async fn test_malformed_block_fails() {
    let mut server = mockito::Server::new_async().await;
    let _m = serve(&mut server, create_recipe_html(r#"{"name": "Pancakes" "#)).await;

    let url = format!("{}/recipe", server.url());
    let err = scrape_recipe(&url, "u", "r").await.unwrap_err();
    assert!(matches!(
        err,
        ImportError::ExtractionError(ExtractionError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn test_missing_instructions_fails() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@type": "Recipe",
        "name": "Half a recipe",
        "description": "No steps here",
        "recipeIngredient": ["flour"]
    }
    "#;
    let _m = serve(&mut server, create_recipe_html(json_ld)).await;

    let url = format!("{}/recipe", server.url());
    let err = scrape_recipe(&url, "u", "r").await.unwrap_err();
    assert!(matches!(
        err,
        ImportError::NormalizationError(NormalizationError::MissingRequiredField(
            RequiredField::Instructions
        ))
    ));
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe")
        .with_status(503)
        .create_async()
        .await;

    let url = format!("{}/recipe", server.url());
    let err = scrape_recipe(&url, "u", "r").await.unwrap_err();
    assert!(matches!(
        err,
        ImportError::FetchError(FetchError::HttpStatus { status: 503, .. })
    ));
}
