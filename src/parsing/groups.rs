use log::{debug, warn};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::model::{Group, DEFAULT_GROUP};

/// Normalizes a grouped field (`ingredients`, `instructions`, `tips`).
///
/// - absent or `null` → no groups
/// - flat list of strings → a single `"All"` group
/// - mapping of name → list of strings → one group per name, ordered by
///   `order` where it names a key, then by the decoded map's own order
///
/// Anything else, including nested objects inside a group, is a
/// [`ParseError::FieldTypeMismatch`] for this field only.
pub(crate) fn normalize_field(
    field: &str,
    value: Option<&Value>,
    order: Option<&[String]>,
) -> Result<Vec<Group>, ParseError> {
    let mismatch = || ParseError::FieldTypeMismatch {
        field: field.to_string(),
    };

    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => {
            let items = string_items(items).ok_or_else(mismatch)?;
            Ok(vec![Group::new(DEFAULT_GROUP, items)])
        }
        Some(Value::Object(map)) => {
            let mut groups = Vec::with_capacity(map.len());
            for name in ordered_keys(map, order) {
                let items = match map.get(name) {
                    Some(Value::Array(items)) => string_items(items).ok_or_else(mismatch)?,
                    _ => return Err(mismatch()),
                };
                if name.trim().is_empty() {
                    warn!("Dropping unnamed group in '{}'", field);
                    continue;
                }
                groups.push(Group::new(name.clone(), items));
            }
            Ok(groups)
        }
        Some(_) => Err(mismatch()),
    }
}

/// Keys of `map`, recovered textual order first, remaining keys after.
fn ordered_keys<'m>(map: &'m Map<String, Value>, order: Option<&[String]>) -> Vec<&'m String> {
    let mut keys: Vec<&String> = Vec::with_capacity(map.len());

    if let Some(order) = order {
        for name in order {
            if let Some((key, _)) = map.get_key_value(name) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        if keys.len() < map.len() {
            debug!(
                "Recovered order covers {} of {} groups, appending the rest",
                keys.len(),
                map.len()
            );
        }
    }

    for key in map.keys() {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys
}

fn string_items(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(String::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_flat_list_is_single_all_group() {
        let value = json!(["Toss.", "Serve."]);
        let groups = normalize_field("instructions", Some(&value), None).unwrap();
        assert_eq!(
            groups,
            vec![Group::new(
                "All",
                vec!["Toss.".to_string(), "Serve.".to_string()]
            )]
        );
    }

    #[test]
    fn test_empty_flat_list_still_yields_all() {
        let value = json!([]);
        let groups = normalize_field("ingredients", Some(&value), None).unwrap();
        assert_eq!(groups, vec![Group::new("All", vec![])]);
    }

    #[test]
    fn test_absent_and_null() {
        assert!(normalize_field("tips", None, None).unwrap().is_empty());
        assert!(normalize_field("tips", Some(&Value::Null), None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_mapping_uses_recovered_order() {
        let value = json!({"Sauce": ["soy"], "Protein": ["tofu"]});
        let order = vec!["Sauce".to_string(), "Protein".to_string()];
        let groups = normalize_field("ingredients", Some(&value), Some(&order)).unwrap();
        assert_eq!(names(&groups), vec!["Sauce", "Protein"]);
    }

    #[test]
    fn test_mapping_without_order_uses_map_order() {
        let value = json!({"Sauce": ["soy"], "Protein": ["tofu"]});
        let expected: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let groups = normalize_field("ingredients", Some(&value), None).unwrap();
        assert_eq!(names(&groups), expected);
    }

    #[test]
    fn test_partial_order_appends_missing_and_ignores_unknown() {
        let value = json!({"A": [], "B": [], "C": []});
        let order = vec!["C".to_string(), "Z".to_string(), "C".to_string()];
        let groups = normalize_field("tips", Some(&value), Some(&order)).unwrap();
        assert_eq!(groups[0].name, "C");
        assert_eq!(groups.len(), 3);
        assert!(names(&groups).contains(&"A"));
        assert!(names(&groups).contains(&"B"));
    }

    #[test]
    fn test_unexpected_shapes_are_mismatches() {
        let cases = [
            json!("just a string"),
            json!(42),
            json!([1, 2]),
            json!({"Sauce": "soy"}),
            json!({"Sauce": {"base": ["soy"]}}),
            json!({"Sauce": ["soy", null]}),
        ];
        for value in cases {
            let err = normalize_field("ingredients", Some(&value), None).unwrap_err();
            assert_eq!(
                err,
                ParseError::FieldTypeMismatch {
                    field: "ingredients".to_string()
                },
                "value: {value}"
            );
        }
    }

    #[test]
    fn test_unnamed_group_is_dropped() {
        let value = json!({"": ["x"], "Main": ["y"]});
        let groups = normalize_field("ingredients", Some(&value), None).unwrap();
        assert_eq!(names(&groups), vec!["Main"]);
    }
}
