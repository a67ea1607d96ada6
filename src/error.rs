use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

/// Errors produced while turning a completion into recipe drafts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not valid JSON, or a single recipe without `title`/`description`
    #[error("Malformed recipe payload: {0}")]
    Malformed(String),

    /// A `recipes` array decoded but no element carried the required fields
    #[error("No valid recipes found in payload")]
    NoValidRecipes,

    /// A grouped field had neither the flat-list nor the mapping shape.
    /// Field-local: the parser degrades the field instead of returning this.
    #[error("Field '{field}' has an unexpected type")]
    FieldTypeMismatch { field: String },
}

/// Errors that can occur while generating recipes
#[derive(Error, Debug)]
pub enum WhiskError {
    /// HTTP request to the completion endpoint failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The completion could not be turned into a recipe
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The completion provider reported an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Invalid input provided by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// The completion did not arrive in time
    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Persistence collaborator error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl WhiskError {
    /// True when asking the user to rephrase their meal description may help.
    pub fn is_retryable_by_rephrasing(&self) -> bool {
        matches!(self, WhiskError::Parse(_))
    }
}
