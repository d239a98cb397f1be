//! Mapping of extracted structured data onto the canonical [`Recipe`].

mod content;
mod duration;
mod fields;

pub use duration::{parse_duration, parse_duration_str};
pub use fields::CanonicalField;

use crate::error::{NormalizationError, RequiredField};
use crate::extractors::RawRecipeRecord;
use crate::model::{HoursMinutes, ImageRef, Recipe, RecipeContent, Times};
use log::debug;

pub struct RecipeNormalizer;

impl RecipeNormalizer {
    /// Build the canonical recipe owned by `user_id` under `recipe_id`.
    ///
    /// Optional fields fall back to their defaults; a missing required field
    /// is an error rather than an empty value.
    pub fn normalize(
        raw: &RawRecipeRecord,
        user_id: &str,
        recipe_id: &str,
    ) -> Result<Recipe, NormalizationError> {
        let name = required_text(raw, CanonicalField::Name, RequiredField::Name)?;
        let description =
            required_text(raw, CanonicalField::Description, RequiredField::Description)?;
        let ingredients =
            required_content(raw, CanonicalField::Ingredients, RequiredField::Ingredients)?;
        let instructions = required_content(
            raw,
            CanonicalField::Instructions,
            RequiredField::Instructions,
        )?;

        let times = Times {
            prep: phase(raw, CanonicalField::PrepTime),
            cook: phase(raw, CanonicalField::CookTime),
            total: phase(raw, CanonicalField::TotalTime),
        };

        let recipe = Recipe {
            recipe_id: recipe_id.to_string(),
            user_id: user_id.to_string(),
            name,
            description,
            ingredients,
            instructions,
            image: CanonicalField::Image
                .lookup(raw)
                .and_then(fields::image_url)
                .map(ImageRef::Url),
            author: CanonicalField::Author.lookup(raw).and_then(fields::author),
            is_favorite: false,
            recipe_yield: CanonicalField::Yield
                .lookup(raw)
                .and_then(fields::recipe_yield),
            times,
        };
        debug!("RecipeNormalizer: normalized {:?}", recipe.name);
        Ok(recipe)
    }
}

fn required_text(
    raw: &RawRecipeRecord,
    field: CanonicalField,
    required: RequiredField,
) -> Result<String, NormalizationError> {
    field
        .lookup(raw)
        .and_then(fields::as_text)
        .ok_or(NormalizationError::MissingRequiredField(required))
}

fn required_content(
    raw: &RawRecipeRecord,
    field: CanonicalField,
    required: RequiredField,
) -> Result<RecipeContent, NormalizationError> {
    field
        .lookup(raw)
        .map(content::to_content)
        .ok_or(NormalizationError::MissingRequiredField(required))
}

fn phase(raw: &RawRecipeRecord, field: CanonicalField) -> HoursMinutes {
    field.lookup(raw).map(parse_duration).unwrap_or_default()
}
