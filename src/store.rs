//! Persistence contract for generated recipes.
//!
//! The document store is an external collaborator: it assigns identifiers and
//! server timestamps, flips favorite flags and deletes records. Drafts handed
//! to it are copied; nothing here ever mutates a [`RecipeDraft`].
//! [`MemoryStore`] implements the contract in process for tests and for
//! shells without a remote backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};

use crate::model::RecipeDraft;

/// A recipe as persisted for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecipe {
    pub id: String,
    #[serde(skip)]
    pub owner: String,
    #[serde(flatten)]
    pub draft: RecipeDraft,
    /// The meal description the user typed
    pub prompt: String,
    pub meal_type: String,
    pub timestamp: DateTime<Utc>,
    pub is_favorite: bool,
}

/// Filters for [`RecipeStore::list`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub favorites_only: bool,
}

impl RecipeQuery {
    pub fn all() -> Self {
        RecipeQuery::default()
    }

    pub fn favorites() -> Self {
        RecipeQuery {
            favorites_only: true,
        }
    }
}

/// Change notifications for live query listeners
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Added(StoredRecipe),
    Updated(StoredRecipe),
    Deleted { owner: String, id: String },
}

impl StoreEvent {
    pub fn owner(&self) -> &str {
        match self {
            StoreEvent::Added(recipe) | StoreEvent::Updated(recipe) => &recipe.owner,
            StoreEvent::Deleted { owner, .. } => owner,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Recipe '{0}' not found")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Per-user recipe collection
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a copy of `draft`; the store assigns id and timestamp
    async fn add(
        &self,
        owner: &str,
        draft: &RecipeDraft,
        prompt: &str,
    ) -> Result<StoredRecipe, StoreError>;

    async fn set_favorite(
        &self,
        owner: &str,
        id: &str,
        is_favorite: bool,
    ) -> Result<StoredRecipe, StoreError>;

    async fn delete(&self, owner: &str, id: &str) -> Result<(), StoreError>;

    /// Records for `owner`, newest first
    async fn list(&self, owner: &str, query: RecipeQuery) -> Result<Vec<StoredRecipe>, StoreError>;

    /// Subscribe to every change made after this call
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;

    async fn get(&self, owner: &str, id: &str) -> Result<StoredRecipe, StoreError> {
        self.list(owner, RecipeQuery::all())
            .await?
            .into_iter()
            .find(|recipe| recipe.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn toggle_favorite(&self, owner: &str, id: &str) -> Result<StoredRecipe, StoreError> {
        let current = self.get(owner, id).await?;
        self.set_favorite(owner, id, !current.is_favorite).await
    }
}

const EVENT_CAPACITY: usize = 64;

/// In-process [`RecipeStore`]
pub struct MemoryStore {
    recipes: RwLock<HashMap<String, Vec<StoredRecipe>>>,
    next_id: AtomicU64,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        MemoryStore {
            recipes: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            events,
        }
    }

    fn publish(&self, event: StoreEvent) {
        // No listeners is fine
        let _ = self.events.send(event);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn add(
        &self,
        owner: &str,
        draft: &RecipeDraft,
        prompt: &str,
    ) -> Result<StoredRecipe, StoreError> {
        let id = format!("rcp-{:06}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let recipe = StoredRecipe {
            id,
            owner: owner.to_string(),
            draft: draft.clone(),
            prompt: prompt.to_string(),
            meal_type: String::new(),
            timestamp: Utc::now(),
            is_favorite: false,
        };

        self.recipes
            .write()
            .await
            .entry(owner.to_string())
            .or_default()
            .push(recipe.clone());
        debug!("Stored recipe '{}' as {}", recipe.draft.title(), recipe.id);

        self.publish(StoreEvent::Added(recipe.clone()));
        Ok(recipe)
    }

    async fn set_favorite(
        &self,
        owner: &str,
        id: &str,
        is_favorite: bool,
    ) -> Result<StoredRecipe, StoreError> {
        let updated = {
            let mut recipes = self.recipes.write().await;
            let recipe = recipes
                .get_mut(owner)
                .and_then(|list| list.iter_mut().find(|recipe| recipe.id == id))
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            recipe.is_favorite = is_favorite;
            recipe.clone()
        };

        self.publish(StoreEvent::Updated(updated.clone()));
        Ok(updated)
    }

    async fn delete(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        {
            let mut recipes = self.recipes.write().await;
            let list = recipes
                .get_mut(owner)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            let position = list
                .iter()
                .position(|recipe| recipe.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            list.remove(position);
        }

        self.publish(StoreEvent::Deleted {
            owner: owner.to_string(),
            id: id.to_string(),
        });
        Ok(())
    }

    async fn list(&self, owner: &str, query: RecipeQuery) -> Result<Vec<StoredRecipe>, StoreError> {
        let recipes = self.recipes.read().await;
        let mut matching: Vec<StoredRecipe> = recipes
            .get(owner)
            .map(|list| {
                list.iter()
                    .filter(|recipe| !query.favorites_only || recipe.is_favorite)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // Newest first; ids break ties between records added in the same instant
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        Ok(matching)
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;

    fn draft(title: &str) -> RecipeDraft {
        let json = format!(r#"{{"title": "{title}", "description": "Tasty.", "ingredients": ["salt"]}}"#);
        parse(&json).unwrap().into_drafts().remove(0)
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_defaults() {
        let store = MemoryStore::new();
        let stored = store.add("user-1", &draft("Soup"), "warm soup").await.unwrap();

        assert!(!stored.id.is_empty());
        assert!(!stored.is_favorite);
        assert_eq!(stored.prompt, "warm soup");
        assert_eq!(stored.draft.title(), "Soup");
    }

    #[tokio::test]
    async fn test_list_newest_first_and_per_owner() {
        let store = MemoryStore::new();
        store.add("user-1", &draft("First"), "").await.unwrap();
        store.add("user-1", &draft("Second"), "").await.unwrap();
        store.add("user-2", &draft("Other"), "").await.unwrap();

        let titles: Vec<String> = store
            .list("user-1", RecipeQuery::all())
            .await
            .unwrap()
            .iter()
            .map(|recipe| recipe.draft.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
        assert!(store.list("nobody", RecipeQuery::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_favorites_query_and_toggle() {
        let store = MemoryStore::new();
        let soup = store.add("u", &draft("Soup"), "").await.unwrap();
        store.add("u", &draft("Salad"), "").await.unwrap();

        let toggled = store.toggle_favorite("u", &soup.id).await.unwrap();
        assert!(toggled.is_favorite);

        let favorites = store.list("u", RecipeQuery::favorites()).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, soup.id);

        let toggled = store.toggle_favorite("u", &soup.id).await.unwrap();
        assert!(!toggled.is_favorite);
        assert!(store.list("u", RecipeQuery::favorites()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_not_found() {
        let store = MemoryStore::new();
        let soup = store.add("u", &draft("Soup"), "").await.unwrap();

        store.delete("u", &soup.id).await.unwrap();
        assert_eq!(
            store.delete("u", &soup.id).await,
            Err(StoreError::NotFound(soup.id.clone()))
        );
        assert_eq!(
            store.set_favorite("u", &soup.id, true).await.unwrap_err(),
            StoreError::NotFound(soup.id.clone())
        );
        assert!(store.get("someone-else", &soup.id).await.is_err());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = MemoryStore::new();
        let mut events = store.subscribe();

        let soup = store.add("u", &draft("Soup"), "").await.unwrap();
        store.set_favorite("u", &soup.id, true).await.unwrap();
        store.delete("u", &soup.id).await.unwrap();

        assert!(matches!(events.recv().await.unwrap(), StoreEvent::Added(r) if r.id == soup.id));
        match events.recv().await.unwrap() {
            StoreEvent::Updated(recipe) => assert!(recipe.is_favorite),
            other => panic!("unexpected event {other:?}"),
        }
        let deleted = events.recv().await.unwrap();
        assert_eq!(deleted.owner(), "u");
        assert_eq!(
            deleted,
            StoreEvent::Deleted {
                owner: "u".to_string(),
                id: soup.id
            }
        );
    }

    #[tokio::test]
    async fn test_stored_copy_serializes_flat() {
        let store = MemoryStore::new();
        let stored = store.add("u", &draft("Soup"), "soup please").await.unwrap();

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["title"], "Soup");
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["prompt"], "soup please");
        assert!(json.get("owner").is_none());
        assert_eq!(json["ingredientGroups"][0]["name"], "All");
    }
}
