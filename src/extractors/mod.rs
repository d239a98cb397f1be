use crate::error::ExtractionError;
use serde_json::{Map, Value};

mod json_ld;

pub use self::json_ld::JsonLdExtractor;

/// Loosely-typed recipe document as decoded from a page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecipeRecord {
    fields: Map<String, Value>,
}

impl RawRecipeRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Value under `key`; JSON `null` counts as absent
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for RawRecipeRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

pub trait Extractor {
    fn extract(&self, html: &str) -> Result<RawRecipeRecord, ExtractionError>;
}
