use serde::Serialize;

/// Name of the single group a flat list collapses into.
pub const DEFAULT_GROUP: &str = "All";

/// A named subsection of ingredients, instructions or tips
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub name: String,
    pub items: Vec<String>,
}

impl Group {
    pub fn new(name: impl Into<String>, items: Vec<String>) -> Self {
        Group {
            name: name.into(),
            items,
        }
    }
}

/// A recipe parsed from one completion, not yet persisted.
///
/// Drafts are built only by the parser and are read-only afterwards;
/// favoriting or deleting happens on the stored copy (see [`crate::store`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    servings: Option<String>,
    ingredient_groups: Vec<Group>,
    instruction_groups: Vec<Group>,
    tip_groups: Vec<Group>,
}

impl RecipeDraft {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        title: String,
        description: String,
        total_time: Option<String>,
        servings: Option<String>,
        ingredient_groups: Vec<Group>,
        instruction_groups: Vec<Group>,
        tip_groups: Vec<Group>,
    ) -> Self {
        RecipeDraft {
            title,
            description,
            total_time,
            servings,
            ingredient_groups,
            instruction_groups,
            tip_groups,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn total_time(&self) -> Option<&str> {
        self.total_time.as_deref()
    }

    pub fn servings(&self) -> Option<&str> {
        self.servings.as_deref()
    }

    pub fn ingredient_groups(&self) -> &[Group] {
        &self.ingredient_groups
    }

    pub fn instruction_groups(&self) -> &[Group] {
        &self.instruction_groups
    }

    pub fn tip_groups(&self) -> &[Group] {
        &self.tip_groups
    }

    /// Group names in display order, e.g. for section headers.
    pub fn ingredient_group_names(&self) -> Vec<&str> {
        self.ingredient_groups.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn instruction_group_names(&self) -> Vec<&str> {
        self.instruction_groups
            .iter()
            .map(|g| g.name.as_str())
            .collect()
    }

    pub fn tip_group_names(&self) -> Vec<&str> {
        self.tip_groups.iter().map(|g| g.name.as_str()).collect()
    }
}

/// Result of parsing one completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecipes {
    /// The payload was a bare recipe object
    Single(RecipeDraft),
    /// The payload wrapped several recipes in a `recipes` array
    Multiple(Vec<RecipeDraft>),
}

impl ParsedRecipes {
    pub fn len(&self) -> usize {
        match self {
            ParsedRecipes::Single(_) => 1,
            ParsedRecipes::Multiple(drafts) => drafts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_drafts(self) -> Vec<RecipeDraft> {
        match self {
            ParsedRecipes::Single(draft) => vec![draft],
            ParsedRecipes::Multiple(drafts) => drafts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecipeDraft {
        RecipeDraft::new(
            "Classic Caesar Salad 🥗".to_string(),
            "A refreshing salad.".to_string(),
            Some("30 minutes".to_string()),
            None,
            vec![
                Group::new("Dressing", vec!["1/2 cup Caesar dressing".to_string()]),
                Group::new("Salad", vec!["2 romaine hearts".to_string()]),
            ],
            vec![Group::new(DEFAULT_GROUP, vec!["Toss.".to_string()])],
            vec![],
        )
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["totalTime"], "30 minutes");
        assert!(json.get("servings").is_none());
        assert_eq!(json["ingredientGroups"][0]["name"], "Dressing");
        assert_eq!(json["tipGroups"], serde_json::json!([]));
    }

    #[test]
    fn test_group_names_keep_order() {
        let draft = sample();
        assert_eq!(draft.ingredient_group_names(), vec!["Dressing", "Salad"]);
        assert_eq!(draft.instruction_group_names(), vec!["All"]);
        assert!(draft.tip_group_names().is_empty());
    }

    #[test]
    fn test_into_drafts() {
        let single = ParsedRecipes::Single(sample());
        assert_eq!(single.len(), 1);
        assert_eq!(single.into_drafts()[0].title(), "Classic Caesar Salad 🥗");

        let many = ParsedRecipes::Multiple(vec![sample(), sample()]);
        assert_eq!(many.into_drafts().len(), 2);
    }
}
