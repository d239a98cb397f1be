use crate::extractors::RawRecipeRecord;
use html_escape::decode_html_entities;
use log::debug;
use serde_json::Value;

/// Canonical recipe fields fed from extracted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Name,
    Description,
    Ingredients,
    Instructions,
    Image,
    Author,
    Yield,
    PrepTime,
    CookTime,
    TotalTime,
}

impl CanonicalField {
    /// Raw keys that may carry this field, most specific first
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Name => &["name", "headline", "title"],
            CanonicalField::Description => &["description", "abstract"],
            CanonicalField::Ingredients => &["recipeIngredient", "ingredients"],
            CanonicalField::Instructions => &["recipeInstructions", "instructions", "steps"],
            CanonicalField::Image => &["image", "thumbnailUrl"],
            CanonicalField::Author => &["author", "creator"],
            CanonicalField::Yield => &["recipeYield", "yield"],
            CanonicalField::PrepTime => &["prepTime"],
            CanonicalField::CookTime => &["cookTime"],
            CanonicalField::TotalTime => &["totalTime"],
        }
    }

    /// First synonym present in the record
    pub fn lookup(self, raw: &RawRecipeRecord) -> Option<&Value> {
        self.synonyms().iter().find_map(|key| {
            let value = raw.get(key)?;
            debug!("RecipeNormalizer: {:?} taken from '{}'", self, key);
            Some(value)
        })
    }
}

pub(crate) fn decode_html_symbols(text: &str) -> String {
    // some sites escape twice
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Coerce a scalar-ish value to text
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(decode_html_symbols(s.trim())),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => ["text", "name", "@value"]
            .iter()
            .find_map(|key| obj.get(*key))
            .and_then(as_text),
        Value::Array(items) => items.iter().find_map(as_text),
        Value::Null | Value::Bool(_) => None,
    }
}

pub(crate) fn author(value: &Value) -> Option<String> {
    let name = match value {
        Value::Array(authors) => {
            let names: Vec<String> = authors
                .iter()
                .filter_map(as_text)
                .filter(|name| !name.is_empty())
                .collect();
            names.join(", ")
        }
        other => as_text(other)?,
    };
    (!name.is_empty()).then_some(name)
}

pub(crate) fn recipe_yield(value: &Value) -> Option<String> {
    let text = match value {
        Value::Array(entries) => {
            let entries: Vec<String> = entries.iter().filter_map(as_text).collect();
            // "4 servings" over a bare "4"
            entries
                .iter()
                .find(|s| s.contains(char::is_alphabetic))
                .or_else(|| entries.first())
                .cloned()?
        }
        other => as_text(other)?,
    };
    (!text.is_empty()).then_some(text)
}

pub(crate) fn image_url(value: &Value) -> Option<String> {
    let url = match value {
        Value::String(url) => decode_html_symbols(url.trim()),
        Value::Object(obj) => ["url", "contentUrl", "@id"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str))
            .map(|url| decode_html_symbols(url.trim()))?,
        Value::Array(images) => return images.iter().find_map(image_url),
        _ => return None,
    };
    (!url.is_empty()).then_some(url)
}
