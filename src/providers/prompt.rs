/// System message sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are a helpful recipe generator named Whisk.";

/// Shape of one recipe object the model is asked to return.
const RECIPE_SCHEMA: &str = r#"  "title": a concise recipe name (include an emoji at the end to represent the recipe),
  "description": a short description of the dish,
  "totalTime": the total preparation and cooking time, e.g. "30 minutes",
  "servings": the number of servings as a string, e.g. "4",
  "ingredients": an object mapping group names (e.g. "Sauce", "Salad") to arrays of strings, one ingredient each,
  "instructions": an object mapping section names (e.g. "Preparation", "Assembly") to arrays of strings, one step each,
  "tips": an object mapping categories (e.g. "Variations", "Storage") to arrays of strings"#;

const OUTPUT_RULES: &str = "Group values must be flat arrays of strings, never nested objects.
List the groups in the order they should be shown.
Do not include any extra text, markdown formatting, or code fences.";

/// A request for `count` recipes matching a free-text meal description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePrompt {
    description: String,
    count: usize,
}

impl RecipePrompt {
    pub fn new(description: impl Into<String>, count: usize) -> Self {
        RecipePrompt {
            description: description.into(),
            count: count.max(1),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn system(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// The user message for the completion request
    pub fn user(&self) -> String {
        if self.count == 1 {
            format!(
                "Generate a recipe based on the following description: \"{}\".\n\
                 Return your answer as valid JSON with exactly these keys:\n{}\n{}",
                self.description, RECIPE_SCHEMA, OUTPUT_RULES
            )
        } else {
            format!(
                "Generate {} different recipes based on the following description: \"{}\".\n\
                 Return your answer as valid JSON of the form {{\"recipes\": [...]}}, \
                 where every element is an object with exactly these keys:\n{}\n\
                 Every recipe must have a distinct title.\n{}",
                self.count, self.description, RECIPE_SCHEMA, OUTPUT_RULES
            )
        }
    }
}
