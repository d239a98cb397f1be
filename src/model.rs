use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Canonical recipe record as stored for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub ingredients: RecipeContent,
    pub instructions: RecipeContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(
        rename = "yield",
        alias = "recipeYield",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recipe_yield: Option<String>,
    #[serde(default)]
    pub times: Times,
}

impl Recipe {
    /// Overwrite every mutable field the patch carries.
    ///
    /// `recipe_id` and `user_id` are identity and never change.
    pub fn apply(&mut self, patch: RecipePatch) {
        let RecipePatch {
            name,
            description,
            ingredients,
            instructions,
            image,
            author,
            is_favorite,
            recipe_yield,
            times,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = ingredients;
        }
        if let Some(instructions) = instructions {
            self.instructions = instructions;
        }
        if let Some(image) = image {
            self.image = Some(image);
        }
        if let Some(author) = author {
            self.author = Some(author);
        }
        if let Some(is_favorite) = is_favorite {
            self.is_favorite = is_favorite;
        }
        if let Some(recipe_yield) = recipe_yield {
            self.recipe_yield = Some(recipe_yield);
        }
        if let Some(times) = times {
            self.times = times;
        }
    }
}

/// Fields a client may change on a stored recipe; `None` leaves the value as is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<RecipeContent>,
    #[serde(default)]
    pub instructions: Option<RecipeContent>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(rename = "yield", alias = "recipeYield", default)]
    pub recipe_yield: Option<String>,
    #[serde(default)]
    pub times: Option<Times>,
}

/// Ingredient or instruction payload; the shape varies by source site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RecipeContent {
    Text(String),
    List(Vec<String>),
    Grouped(Vec<ContentGroup>),
}

impl RecipeContent {
    /// All entries in reading order, ignoring group headings
    pub fn items(&self) -> Vec<&str> {
        match self {
            RecipeContent::Text(text) => vec![text.as_str()],
            RecipeContent::List(items) => items.iter().map(String::as_str).collect(),
            RecipeContent::Grouped(groups) => groups
                .iter()
                .flat_map(|group| group.items.iter().map(String::as_str))
                .collect(),
        }
    }
}

/// A named (or anonymous) section of ingredients or steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub items: Vec<String>,
}

/// Reference to a recipe picture: either where it lives or the bytes themselves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Inline {
        #[serde(rename = "contentType")]
        content_type: String,
        /// Base64 (standard alphabet) encoded image bytes
        data: String,
    },
}

impl ImageRef {
    pub fn png(bytes: &[u8]) -> Self {
        ImageRef::Inline {
            content_type: "image/png".to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ImageRef::Url(url) => Some(url),
            ImageRef::Inline { .. } => None,
        }
    }

    /// Raw bytes of an inline image
    pub fn decode(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        match self {
            ImageRef::Url(_) => None,
            ImageRef::Inline { data, .. } => Some(STANDARD.decode(data)),
        }
    }
}

/// Preparation, cooking and total durations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Times {
    #[serde(default)]
    pub prep: HoursMinutes,
    #[serde(default)]
    pub cook: HoursMinutes,
    #[serde(default)]
    pub total: HoursMinutes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursMinutes {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
}

impl HoursMinutes {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Build from a minute count, carrying whole hours over
    pub fn from_minutes(total: u64) -> Self {
        let hours = u32::try_from(total / 60).unwrap_or(u32::MAX);
        // always < 60
        let minutes = (total % 60) as u32;
        Self { hours, minutes }
    }

    /// ISO-8601 rendering, e.g. `PT1H30M`
    pub fn to_iso8601(&self) -> String {
        match (self.hours, self.minutes) {
            (0, 0) => "PT0M".to_string(),
            (0, m) => format!("PT{m}M"),
            (h, 0) => format!("PT{h}H"),
            (h, m) => format!("PT{h}H{m}M"),
        }
    }
}
