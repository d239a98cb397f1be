pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod images;
pub mod model;
pub mod normalizer;
pub mod pipelines;
pub mod store;

// Re-export commonly used types
pub use builder::{ImportResult, InputSource, RecipeImporter, RecipeImporterBuilder};
pub use config::AppConfig;
pub use error::{
    BackendError, ExtractionError, FetchError, ImageError, ImportError, NormalizationError,
    RequiredField, StoreError,
};
pub use model::{ContentGroup, HoursMinutes, ImageRef, Recipe, RecipeContent, RecipePatch, Times};
pub use store::{DocumentStore, MemoryDocumentStore, RecipeFilter, RecipeStore};

use fetchers::RequestFetcher;
use std::time::Duration;

/// Scrape a recipe page into an unsaved canonical recipe
///
/// # Arguments
/// * `url` - The recipe page
/// * `user_id` - Owner of the resulting recipe
/// * `recipe_id` - Caller-assigned identifier
///
/// # Returns
/// The normalized recipe, not yet stored
pub async fn scrape_recipe(
    url: &str,
    user_id: &str,
    recipe_id: &str,
) -> Result<Recipe, ImportError> {
    scrape_recipe_with_timeout(url, user_id, recipe_id, None).await
}

/// Scrape a recipe page with an explicit request timeout (default 30 s)
pub async fn scrape_recipe_with_timeout(
    url: &str,
    user_id: &str,
    recipe_id: &str,
    timeout: Option<Duration>,
) -> Result<Recipe, ImportError> {
    let fetcher = RequestFetcher::new(timeout)?;
    pipelines::url::process(&fetcher, url, user_id, recipe_id).await
}

/// Fetch an image and re-encode it as PNG
pub async fn convert_image(image_url: &str) -> Result<Vec<u8>, ImageError> {
    let fetcher = RequestFetcher::new(None)?;
    pipelines::image::process(&fetcher, image_url).await
}
