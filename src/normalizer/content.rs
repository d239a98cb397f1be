use super::fields::{as_text, decode_html_symbols};
use crate::model::{ContentGroup, RecipeContent};
use serde_json::{Map, Value};

/// Map an ingredient or instruction payload onto [`RecipeContent`].
///
/// Shapes are not validated; anything unrecognised is kept as text.
pub(crate) fn to_content(value: &Value) -> RecipeContent {
    match value {
        Value::String(text) => RecipeContent::Text(decode_html_symbols(text.trim())),
        Value::Array(items) => from_array(items),
        Value::Object(obj) if is_section(obj) => RecipeContent::Grouped(vec![section(obj)]),
        Value::Object(obj) => match entry_text(obj) {
            Some(text) => RecipeContent::List(vec![text]),
            None => RecipeContent::Text(value.to_string()),
        },
        other => RecipeContent::Text(other.to_string()),
    }
}

fn from_array(items: &[Value]) -> RecipeContent {
    let grouped = items
        .iter()
        .any(|item| item.is_array() || item.as_object().is_some_and(is_section));
    if !grouped {
        return RecipeContent::List(items.iter().filter_map(item_text).collect());
    }

    let mut groups = Vec::new();
    let mut loose = Vec::new();
    for item in items {
        match item {
            Value::Object(obj) if is_section(obj) => {
                flush(&mut loose, &mut groups);
                groups.push(section(obj));
            }
            Value::Array(inner) => {
                flush(&mut loose, &mut groups);
                groups.push(ContentGroup {
                    name: None,
                    items: flatten(inner),
                });
            }
            other => loose.extend(item_text(other)),
        }
    }
    flush(&mut loose, &mut groups);
    RecipeContent::Grouped(groups)
}

fn flush(loose: &mut Vec<String>, groups: &mut Vec<ContentGroup>) {
    if !loose.is_empty() {
        groups.push(ContentGroup {
            name: None,
            items: std::mem::take(loose),
        });
    }
}

fn is_section(obj: &Map<String, Value>) -> bool {
    obj.get("@type")
        .and_then(Value::as_str)
        .is_some_and(|t| t.eq_ignore_ascii_case("HowToSection"))
        || obj.get("itemListElement").is_some_and(Value::is_array)
}

fn section(obj: &Map<String, Value>) -> ContentGroup {
    let items = match obj.get("itemListElement") {
        Some(Value::Array(steps)) => flatten(steps),
        Some(other) => item_text(other).into_iter().collect(),
        None => Vec::new(),
    };
    ContentGroup {
        name: obj.get("name").and_then(as_text).filter(|n| !n.is_empty()),
        items,
    }
}

/// Entries of a nested list, with sub-sections inlined
fn flatten(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| match item {
            Value::Object(obj) if is_section(obj) => section(obj).items,
            Value::Array(inner) => flatten(inner),
            other => item_text(other).into_iter().collect(),
        })
        .collect()
}

fn item_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Object(obj) => entry_text(obj)?,
        other => as_text(other)?,
    };
    (!text.is_empty()).then_some(text)
}

/// Text of a `HowToStep` or ingredient object
fn entry_text(obj: &Map<String, Value>) -> Option<String> {
    if let Some(text) = obj.get("text").and_then(as_text) {
        return Some(text);
    }
    let name = obj.get("name").and_then(as_text);
    let amount = obj
        .get("amount")
        .and_then(as_text)
        .filter(|amount| !amount.is_empty());
    match (amount, name) {
        (Some(amount), Some(name)) => Some(format!("{amount} {name}")),
        (None, Some(name)) => Some(name),
        (_, None) => obj.get("description").and_then(as_text),
    }
}
