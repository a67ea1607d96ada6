//! Turns a recipe completion into [`RecipeDraft`]s.
//!
//! Control flow: [`sanitize`] → (multi-recipe only) [`locate_recipe_fragment`]
//! → [`extract_ordered_keys`] for each grouped field → field normalization.
//! Everything here is pure and holds no shared state, so it can be called
//! from any thread.

mod fragment;
mod groups;
mod key_order;
mod sanitize;

use std::borrow::Cow;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::model::{Group, ParsedRecipes, RecipeDraft};

pub use self::fragment::locate_recipe_fragment;
pub use self::key_order::extract_ordered_keys;
pub use self::sanitize::sanitize;

/// Grouped fields, in the order they are normalized.
pub const GROUPED_FIELDS: [&str; 3] = ["ingredients", "instructions", "tips"];

/// Sanitizes a raw completion and parses it.
pub fn parse_completion(raw: &str) -> Result<ParsedRecipes, ParseError> {
    parse(&sanitize(raw))
}

/// Parses a sanitized payload into one recipe or a list of recipes.
///
/// A non-empty `recipes` array of objects selects the multi-recipe path,
/// where elements missing `title` or `description` are skipped. Otherwise
/// the object itself must be a recipe.
pub fn parse(sanitized: &str) -> Result<ParsedRecipes, ParseError> {
    let root = decode_object(sanitized)?;

    if let Some(recipes) = recipe_list(&root) {
        return parse_many(&recipes, sanitized).map(ParsedRecipes::Multiple);
    }

    build_draft(&root, sanitized)
        .map(ParsedRecipes::Single)
        .ok_or_else(|| ParseError::Malformed("recipe is missing title or description".to_string()))
}

/// Decodes the first JSON value in `text`, ignoring anything after it.
fn decode_object(text: &str) -> Result<Map<String, Value>, ParseError> {
    let mut values = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    match values.next() {
        Some(Ok(Value::Object(map))) => Ok(map),
        Some(Ok(other)) => Err(ParseError::Malformed(format!(
            "expected a JSON object, found {}",
            kind(&other)
        ))),
        Some(Err(e)) => Err(ParseError::Malformed(e.to_string())),
        None => Err(ParseError::Malformed("empty completion".to_string())),
    }
}

/// The `recipes` elements, if the root holds a non-empty list of objects.
fn recipe_list(root: &Map<String, Value>) -> Option<Vec<&Map<String, Value>>> {
    let elements = root.get("recipes")?.as_array()?;
    if elements.is_empty() {
        return None;
    }
    elements.iter().map(Value::as_object).collect()
}

fn parse_many(
    recipes: &[&Map<String, Value>],
    full_json: &str,
) -> Result<Vec<RecipeDraft>, ParseError> {
    let mut drafts = Vec::with_capacity(recipes.len());

    for (index, recipe) in recipes.iter().copied().enumerate() {
        let Some(title) = required_title(recipe) else {
            warn!("Skipping recipe #{}: missing title", index);
            continue;
        };

        let source = match locate_recipe_fragment(title, full_json) {
            Some(fragment) => Cow::Borrowed(fragment),
            None => {
                warn!(
                    "Could not locate '{}' in the payload, group order falls back to decoded order",
                    title
                );
                Cow::Owned(serde_json::to_string(recipe).unwrap_or_default())
            }
        };

        match build_draft(recipe, &source) {
            Some(draft) => drafts.push(draft),
            None => warn!("Skipping recipe #{} '{}': missing description", index, title),
        }
    }

    if drafts.is_empty() {
        return Err(ParseError::NoValidRecipes);
    }
    Ok(drafts)
}

/// Builds one draft from a decoded recipe object. `source` is the text the
/// object was decoded from and is only used to recover group order.
fn build_draft(recipe: &Map<String, Value>, source: &str) -> Option<RecipeDraft> {
    let title = required_title(recipe)?.to_string();
    let description = recipe.get("description")?.as_str()?.to_string();

    let [ingredients, instructions, tips] = GROUPED_FIELDS.map(|field| grouped(recipe, field, source));

    Some(RecipeDraft::new(
        title,
        description,
        optional_text(recipe, "totalTime"),
        optional_text(recipe, "servings"),
        ingredients,
        instructions,
        tips,
    ))
}

/// The title exactly as written; blank titles count as missing.
fn required_title(recipe: &Map<String, Value>) -> Option<&str> {
    recipe
        .get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.trim().is_empty())
}

fn grouped(recipe: &Map<String, Value>, field: &str, source: &str) -> Vec<Group> {
    let order = extract_ordered_keys(field, source);
    debug!("Recovered order for '{}': {:?}", field, order);

    groups::normalize_field(field, recipe.get(field), order.as_deref()).unwrap_or_else(|e| {
        warn!("{}, ignoring it", e);
        Vec::new()
    })
}

/// Optional scalar text such as `totalTime` or `servings`. Numbers are
/// accepted as their textual form.
fn optional_text(recipe: &Map<String, Value>, field: &str) -> Option<String> {
    match recipe.get(field)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(_) | Value::Null => None,
        _ => {
            warn!(
                "{}, ignoring it",
                ParseError::FieldTypeMismatch {
                    field: field.to_string()
                }
            );
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
