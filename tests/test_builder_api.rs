use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use recipe_keeper::{
    AppConfig, ImageRef, ImportError, ImportResult, MemoryDocumentStore, RecipeImporter,
    RecipePatch, RecipeStore, StoreError,
};
use std::io::Cursor;
use std::time::Duration;

fn recipe_page(name: &str, image_url: &str) -> String {
    format!(
        r#"
        <html>
        <head>
            <script type="application/ld+json">
            {{
                "@context": "https://schema.org/",
                "@type": "Recipe",
                "name": "{name}",
                "description": "Quick and easy",
                "image": {{"@type": "ImageObject", "url": "{image_url}"}},
                "recipeIngredient": ["2 eggs", "1 cup flour"],
                "recipeInstructions": [{{"@type": "HowToStep", "text": "Whisk and fry."}}],
                "cookTime": "PT10M"
            }}
            </script>
        </head>
        <body></body>
        </html>
        "#
    )
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img: RgbImage = ImageBuffer::from_pixel(width, height, Rgb([250, 200, 90]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn test_builder_scrape_keeps_image_url() {
    let mut server = mockito::Server::new_async().await;
    let image_url = format!("{}/pic.png", server.url());
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(recipe_page("Crepes", &image_url))
        .create_async()
        .await;

    let result = RecipeImporter::builder()
        .url(format!("{}/recipe", server.url()))
        .user_id("u-1")
        .recipe_id("r-1")
        .timeout(Duration::from_secs(10))
        .build()
        .await
        .unwrap();

    match result {
        ImportResult::Recipe(recipe) => {
            assert_eq!(recipe.name, "Crepes");
            assert_eq!(recipe.image, Some(ImageRef::Url(image_url)));
        }
        ImportResult::Png(_) => panic!("Expected Recipe result"),
    }
}

#[tokio::test]
async fn test_builder_inline_image() {
    let mut server = mockito::Server::new_async().await;
    let image_url = format!("{}/pic.png", server.url());
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(recipe_page("Crepes", &image_url))
        .create_async()
        .await;
    let _pic = server
        .mock("GET", "/pic.png")
        .with_status(200)
        .with_body(png(5, 9))
        .create_async()
        .await;

    let result = RecipeImporter::builder()
        .url(format!("{}/recipe", server.url()))
        .user_id("u-1")
        .recipe_id("r-1")
        .inline_image()
        .build()
        .await
        .unwrap();

    let ImportResult::Recipe(recipe) = result else {
        panic!("Expected Recipe result");
    };
    let bytes = recipe.image.unwrap().decode().unwrap().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (5, 9));
}

#[tokio::test]
async fn test_builder_inline_image_failure_aborts_import() {
    let mut server = mockito::Server::new_async().await;
    let image_url = format!("{}/pic.png", server.url());
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(recipe_page("Crepes", &image_url))
        .create_async()
        .await;
    let _pic = server
        .mock("GET", "/pic.png")
        .with_status(500)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.images.inline = true;

    let err = RecipeImporter::builder()
        .config(config)
        .url(format!("{}/recipe", server.url()))
        .user_id("u-1")
        .recipe_id("r-1")
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::ImageError(_)));
}

#[tokio::test]
async fn test_builder_image_source() {
    let mut server = mockito::Server::new_async().await;
    let _pic = server
        .mock("GET", "/pic.png")
        .with_status(200)
        .with_body(png(12, 4))
        .create_async()
        .await;

    let result = RecipeImporter::builder()
        .image(format!("{}/pic.png", server.url()))
        .build()
        .await
        .unwrap();

    let ImportResult::Png(bytes) = result else {
        panic!("Expected Png result");
    };
    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (12, 4));
}

#[tokio::test]
async fn test_scrape_then_keep_in_recipe_box() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(recipe_page("Crepes", "https://example.com/crepes.jpg"))
        .expect(2)
        .create_async()
        .await;
    let url = format!("{}/recipe", server.url());

    let scrape = |recipe_id: &'static str| {
        RecipeImporter::builder()
            .url(url.clone())
            .user_id("u-1")
            .recipe_id(recipe_id)
            .build()
    };

    let store = RecipeStore::new(MemoryDocumentStore::new());
    let ImportResult::Recipe(first) = scrape("r-1").await.unwrap() else {
        panic!("Expected Recipe result");
    };
    store.create(first).await.unwrap();

    // same page saved twice by the same user
    let ImportResult::Recipe(second) = scrape("r-2").await.unwrap() else {
        panic!("Expected Recipe result");
    };
    assert!(matches!(
        store.create(second).await.unwrap_err(),
        StoreError::DuplicateNameForUser { .. }
    ));

    let updated = store
        .update(
            "r-1",
            "u-1",
            RecipePatch {
                is_favorite: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_favorite);
    assert_eq!(store.list_by_user("u-1").await.unwrap(), vec![updated]);

    store.delete("r-1").await.unwrap();
    assert!(store.list_by_user("u-1").await.unwrap().is_empty());
}
