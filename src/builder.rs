use std::time::Duration;

use crate::config::AppConfig;
use crate::fetchers::RequestFetcher;
use crate::{pipelines, ImportError, Recipe};

/// Represents the input source for an import
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Scrape a recipe page
    Url(String),
    /// Convert a picture to PNG
    Image(String),
}

/// Result of an import operation
#[derive(Debug, Clone)]
pub enum ImportResult {
    /// Canonical recipe, not yet stored
    Recipe(Recipe),
    /// PNG encoded image bytes
    Png(Vec<u8>),
}

/// Builder for configuring and executing recipe imports
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    user_id: Option<String>,
    recipe_id: Option<String>,
    config: AppConfig,
    timeout: Option<Duration>,
    inline_image: Option<bool>,
}

impl RecipeImporterBuilder {
    /// Set the input source to a recipe page
    ///
    /// # Example
    /// ```
    /// use recipe_keeper::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .user_id("user-1")
    ///     .recipe_id("recipe-1");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to a picture that should come back as PNG
    ///
    /// # Example
    /// ```
    /// use recipe_keeper::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .image("https://example.com/pancakes.jpg");
    /// ```
    pub fn image(mut self, image_url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Image(image_url.into()));
        self
    }

    /// Owner of the scraped recipe, as verified by the caller
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Caller-assigned identifier for the scraped recipe
    pub fn recipe_id(mut self, recipe_id: impl Into<String>) -> Self {
        self.recipe_id = Some(recipe_id.into());
        self
    }

    /// Use settings loaded at start-up instead of the defaults
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a timeout for HTTP requests, overriding the configured one
    ///
    /// # Example
    /// ```
    /// use recipe_keeper::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Embed the recipe picture as PNG bytes instead of keeping its URL
    pub fn inline_image(mut self) -> Self {
        self.inline_image = Some(true);
        self
    }

    /// Build and execute the import operation
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - A recipe page was given without owner or recipe id
    /// - Fetching, extraction, normalization or image conversion fails
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_keeper::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .user_id("user-1")
    ///     .recipe_id("recipe-1")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ImportResult, ImportError> {
        let source = self.source.ok_or_else(|| {
            ImportError::BuilderError(
                "No input source specified. Use .url() or .image()".to_string(),
            )
        })?;

        let timeout = self.timeout.unwrap_or_else(|| self.config.fetch.timeout());
        let fetcher = RequestFetcher::with_timeout(&self.config.fetch, timeout)?;

        match source {
            InputSource::Url(url) => {
                let user_id = self.user_id.ok_or_else(|| {
                    ImportError::BuilderError("A recipe needs an owner. Use .user_id()".to_string())
                })?;
                let recipe_id = self.recipe_id.ok_or_else(|| {
                    ImportError::BuilderError(
                        "A recipe needs an identifier. Use .recipe_id()".to_string(),
                    )
                })?;

                let mut recipe =
                    pipelines::url::process(&fetcher, &url, &user_id, &recipe_id).await?;
                if self.inline_image.unwrap_or(self.config.images.inline) {
                    pipelines::image::inline(&fetcher, &mut recipe).await?;
                }
                Ok(ImportResult::Recipe(recipe))
            }

            InputSource::Image(image_url) => {
                let png = pipelines::image::process(&fetcher, &image_url).await?;
                Ok(ImportResult::Png(png))
            }
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_keeper::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
