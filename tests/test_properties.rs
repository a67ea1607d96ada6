use whisk::{extract_ordered_keys, parse, sanitize};

const NAMES: [&str; 5] = ["Sauce", "Protein", "Assembly", "Garnish", "Base"];

fn payload(names: &[&str]) -> String {
    let groups: Vec<String> = names
        .iter()
        .map(|name| format!(r#""{}": ["{} item"]"#, name, name.to_lowercase()))
        .collect();
    format!(
        r#"{{"title": "Bowl", "description": "Layered.", "ingredients": {{{}}}}}"#,
        groups.join(", ")
    )
}

/// Every rotation and reversal of the names round-trips in written order.
fn orderings() -> Vec<Vec<&'static str>> {
    let mut all = Vec::new();
    for shift in 0..NAMES.len() {
        let mut rotated = NAMES.to_vec();
        rotated.rotate_left(shift);
        all.push(rotated.clone());
        rotated.reverse();
        all.push(rotated);
    }
    all
}

#[test]
fn test_group_order_matches_written_order() {
    for names in orderings() {
        let draft = parse(&payload(&names)).unwrap().into_drafts().remove(0);
        assert_eq!(draft.ingredient_group_names(), names);
    }
}

#[test]
fn test_extracted_keys_match_written_order() {
    for names in orderings() {
        let keys = extract_ordered_keys("ingredients", &payload(&names)).unwrap();
        assert_eq!(keys, names);
    }
}

#[test]
fn test_sanitize_is_idempotent() {
    let inputs = [
        "Sorry, I can't help with that.",
        "",
        "   {\"a\": 1}   ",
        "Here you go:\n```json\n{\"title\": \"X\"}\n```",
        "{\"title\": \"X\"}\n```\n```",
        "prefix { not json",
    ];

    for input in inputs {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once, "input: {:?}", input);
    }
}

#[test]
fn test_flat_list_is_single_all_group() {
    let raw = r#"{"title": "Toast", "description": "Simple.", "ingredients": ["bread", "butter"]}"#;
    let draft = parse(raw).unwrap().into_drafts().remove(0);
    assert_eq!(draft.ingredient_group_names(), vec!["All"]);
    assert_eq!(draft.ingredient_groups()[0].items, vec!["bread", "butter"]);
}
