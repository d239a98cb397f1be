use crate::error::ImageError;
use crate::fetchers::RequestFetcher;
use crate::images::ImageNormalizer;
use crate::model::{ImageRef, Recipe};
use log::debug;

/// Fetch a remote picture and return it as PNG bytes
pub async fn process(fetcher: &RequestFetcher, image_url: &str) -> Result<Vec<u8>, ImageError> {
    ImageNormalizer::new(fetcher.clone())
        .normalize(image_url)
        .await
}

/// Replace the recipe's image URL with the converted PNG.
///
/// Recipes without an image, or already carrying inline bytes, are left alone.
pub async fn inline(fetcher: &RequestFetcher, recipe: &mut Recipe) -> Result<(), ImageError> {
    let Some(url) = recipe.image.as_ref().and_then(ImageRef::url) else {
        return Ok(());
    };

    debug!("Inlining image {} for recipe {}", url, recipe.recipe_id);
    let png = process(fetcher, url).await?;
    recipe.image = Some(ImageRef::png(&png));
    Ok(())
}
