use super::{Extractor, RawRecipeRecord};
use crate::error::ExtractionError;
use log::debug;
use scraper::{Html, Selector};
use serde_json::{Map, Value};

const LD_JSON: &str = "application/ld+json";

/// Reads the first `application/ld+json` block of a page.
///
/// Only the first block in document order is considered, even when later
/// blocks exist. Inside that block the recipe node is picked from `@graph`
/// or a top-level array when the payload is not a bare object.
pub struct JsonLdExtractor;

impl Extractor for JsonLdExtractor {
    fn extract(&self, html: &str) -> Result<RawRecipeRecord, ExtractionError> {
        let document = Html::parse_document(html);
        let payload = first_block(&document).ok_or(ExtractionError::NoStructuredBlock)?;
        debug!("JsonLdExtractor: raw block content: {}", payload);

        let json_ld = parse_payload(&payload)?;

        let node = select_recipe_node(json_ld).ok_or_else(|| {
            ExtractionError::MalformedPayload("block contains no JSON object".to_string())
        })?;
        debug!(
            "JsonLdExtractor: selected node with {} fields",
            node.len()
        );
        Ok(RawRecipeRecord::new(node))
    }
}

fn first_block(document: &Html) -> Option<String> {
    // "script[type]" always parses
    let selector = Selector::parse("script[type]").ok()?;
    let blocks: Vec<_> = document
        .select(&selector)
        .filter(|script| {
            script
                .value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(LD_JSON))
        })
        .collect();
    debug!("JsonLdExtractor: found {} structured-data blocks", blocks.len());

    blocks.first().map(|script| script.inner_html())
}

fn select_recipe_node(json_ld: Value) -> Option<Map<String, Value>> {
    match json_ld {
        Value::Object(mut root) => match root.remove("@graph") {
            Some(Value::Array(graph)) => {
                debug!("JsonLdExtractor: resolving recipe inside @graph");
                pick_from_array(graph)
            }
            Some(graph) => {
                root.insert("@graph".to_string(), graph);
                Some(root)
            }
            None => Some(root),
        },
        Value::Array(items) => {
            debug!("JsonLdExtractor: block is an array of {} items", items.len());
            pick_from_array(items)
        }
        _ => None,
    }
}

/// Prefer a `Recipe` typed node, then one carrying instructions, then any object
fn pick_from_array(items: Vec<Value>) -> Option<Map<String, Value>> {
    let position = items
        .iter()
        .position(is_recipe_type)
        .or_else(|| {
            items
                .iter()
                .position(|item| item.get("recipeInstructions").is_some())
        })
        .or_else(|| items.iter().position(Value::is_object))?;

    match items.into_iter().nth(position) {
        Some(Value::Object(node)) => Some(node),
        _ => None,
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// Valid payloads are decoded verbatim; only a failing one gets cleaned up
fn parse_payload(payload: &str) -> Result<Value, ExtractionError> {
    serde_json::from_str(payload.trim()).or_else(|_| {
        debug!("JsonLdExtractor: block is not valid JSON, retrying after cleanup");
        serde_json::from_str(&sanitize_json(payload))
            .map_err(|e| ExtractionError::MalformedPayload(e.to_string()))
    })
}

fn sanitize_json(json_str: &str) -> String {
    json_str
        .trim()
        .trim_start_matches("<!--")
        .trim_end_matches("-->")
        .trim()
        .replace(",]", "]")
        .replace(",}", "}")
}
