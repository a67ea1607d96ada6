//! Whisk turns a free-text meal description into structured recipes.
//!
//! A completion endpoint is asked for strict JSON; what comes back is
//! sanitized, parsed and normalized into [`RecipeDraft`]s whose ingredient,
//! instruction and tip groups keep the order the model wrote them in.
//!
//! The parsing half ([`parse_completion`]) is pure and synchronous. The
//! generation half ([`RecipeGenerator`]) talks to the configured provider.

pub mod builder;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod parsing;
pub mod plain_text;
pub mod providers;
pub mod store;
pub mod uniffi_bindings;

pub use builder::{Provider, RecipeGenerator, RecipeGeneratorBuilder};
pub use error::{ParseError, WhiskError};
pub use model::{Group, ParsedRecipes, RecipeDraft, DEFAULT_GROUP};
pub use parsing::{
    extract_ordered_keys, locate_recipe_fragment, parse, parse_completion, sanitize,
};
pub use store::{MemoryStore, RecipeQuery, RecipeStore, StoreError, StoreEvent, StoredRecipe};

use log::info;

/// Generate one recipe for `description` with the configured providers.
pub async fn generate_recipe(description: &str) -> Result<RecipeDraft, WhiskError> {
    let recipes = RecipeGenerator::builder()
        .description(description)
        .build()
        .await?;

    recipes
        .into_drafts()
        .into_iter()
        .next()
        .ok_or(WhiskError::Parse(ParseError::NoValidRecipes))
}

/// Generate `count` alternative recipes for `description`.
pub async fn generate_recipes(
    description: &str,
    count: usize,
) -> Result<Vec<RecipeDraft>, WhiskError> {
    let recipes = RecipeGenerator::builder()
        .description(description)
        .count(count)
        .build()
        .await?;

    Ok(recipes.into_drafts())
}

/// Run `generator` and persist every resulting draft for `owner`.
pub async fn generate_and_store(
    store: &dyn RecipeStore,
    owner: &str,
    generator: RecipeGeneratorBuilder,
) -> Result<Vec<StoredRecipe>, WhiskError> {
    let prompt = generator.meal_description().unwrap_or_default().to_string();
    let drafts = generator.build().await?.into_drafts();

    let mut stored = Vec::with_capacity(drafts.len());
    for draft in &drafts {
        let recipe = store.add(owner, draft, &prompt).await?;
        info!("Saved '{}' for {}", recipe.draft.title(), owner);
        stored.push(recipe);
    }
    Ok(stored)
}
