use crate::error::ImportError;
use crate::extractors::{Extractor, JsonLdExtractor};
use crate::fetchers::RequestFetcher;
use crate::model::Recipe;
use crate::normalizer::RecipeNormalizer;
use log::debug;

/// Scrape a recipe page into an unsaved canonical recipe
///
/// This pipeline:
/// 1. Fetches the page with a single GET
/// 2. Decodes the first structured-data block
/// 3. Normalizes it for `user_id` under `recipe_id`
pub async fn process(
    fetcher: &RequestFetcher,
    url: &str,
    user_id: &str,
    recipe_id: &str,
) -> Result<Recipe, ImportError> {
    let html = fetcher.fetch_text(url).await?;
    debug!("Scrape: fetched {} characters from {}", html.len(), url);

    let raw = JsonLdExtractor.extract(&html)?;
    let recipe = RecipeNormalizer::normalize(&raw, user_id, recipe_id)?;
    Ok(recipe)
}
