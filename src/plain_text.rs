//! The combined text layout older records were stored with:
//!
//! ```text
//! Description:
//! <description>
//!
//! Ingredients:
//! <one per line>
//!
//! Cooking Instructions:
//! <one per line>
//! ```

use crate::model::{Group, RecipeDraft};

const DESCRIPTION_MARKER: &str = "Description:";
const INGREDIENTS_MARKER: &str = "Ingredients:";
const INSTRUCTIONS_MARKER: &str = "Cooking Instructions:";

/// Sections recovered from a plain-text record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainTextRecipe {
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Renders a draft in the combined text layout, flattening groups in order.
pub fn render(draft: &RecipeDraft) -> String {
    format!(
        "{}\n{}\n\n{}\n{}\n\n{}\n{}",
        DESCRIPTION_MARKER,
        draft.description(),
        INGREDIENTS_MARKER,
        flatten(draft.ingredient_groups()).join("\n"),
        INSTRUCTIONS_MARKER,
        flatten(draft.instruction_groups()).join("\n"),
    )
}

/// Splits a combined text record back into its sections.
///
/// Without an ingredients marker the whole text is the description. Without
/// an instructions marker everything after the ingredients marker is taken
/// as ingredients.
pub fn parse(text: &str) -> PlainTextRecipe {
    let Some(ingredients_at) = text.find(INGREDIENTS_MARKER) else {
        return PlainTextRecipe {
            description: text.to_string(),
            ..Default::default()
        };
    };

    let description = clean_description(&text[..ingredients_at]);
    let after_ingredients = &text[ingredients_at + INGREDIENTS_MARKER.len()..];

    match after_ingredients.find(INSTRUCTIONS_MARKER) {
        Some(instructions_at) => PlainTextRecipe {
            description,
            ingredients: lines(&after_ingredients[..instructions_at]),
            instructions: lines(&after_ingredients[instructions_at + INSTRUCTIONS_MARKER.len()..]),
        },
        None => PlainTextRecipe {
            description,
            ingredients: lines(after_ingredients),
            instructions: Vec::new(),
        },
    }
}

fn flatten(groups: &[Group]) -> Vec<&str> {
    groups
        .iter()
        .flat_map(|group| group.items.iter().map(String::as_str))
        .collect()
}

fn clean_description(section: &str) -> String {
    section
        .trim()
        .replace("Description:\n", "")
        .replace(DESCRIPTION_MARKER, "")
        .trim()
        .to_string()
}

fn lines(section: &str) -> Vec<String> {
    section
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse as parse_payload;

    #[test]
    fn test_render_flattens_groups_in_order() {
        let draft = parse_payload(
            r#"{"title": "Caesar Salad 🥗", "description": "Crisp salad.",
                "ingredients": {"Dressing": ["dressing"], "Salad": ["lettuce", "croutons"]},
                "instructions": ["Toss.", "Serve."]}"#,
        )
        .unwrap()
        .into_drafts()
        .remove(0);

        assert_eq!(
            render(&draft),
            "Description:\nCrisp salad.\n\nIngredients:\ndressing\nlettuce\ncroutons\n\nCooking Instructions:\nToss.\nServe."
        );
    }

    #[test]
    fn test_parse_all_sections() {
        let text = "Description:\nA hearty stew.\n\nIngredients:\n2 carrots\n\n1 onion\n\nCooking Instructions:\nChop.\nSimmer.";
        assert_eq!(
            parse(text),
            PlainTextRecipe {
                description: "A hearty stew.".to_string(),
                ingredients: vec!["2 carrots".to_string(), "1 onion".to_string()],
                instructions: vec!["Chop.".to_string(), "Simmer.".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_without_markers() {
        let parsed = parse("Just some notes about dinner.");
        assert_eq!(parsed.description, "Just some notes about dinner.");
        assert!(parsed.ingredients.is_empty());
        assert!(parsed.instructions.is_empty());
    }

    #[test]
    fn test_parse_without_instructions() {
        let parsed = parse("Quick snack\nIngredients:\napple\npeanut butter\n");
        assert_eq!(parsed.description, "Quick snack");
        assert_eq!(parsed.ingredients, vec!["apple", "peanut butter"]);
        assert!(parsed.instructions.is_empty());
    }
}
