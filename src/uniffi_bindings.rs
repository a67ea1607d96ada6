//! UniFFI bindings for whisk
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! Parsing is exposed directly; generation wraps the async API with a blocking call that
//! manages its own tokio runtime.

use std::fmt;
use std::time::Duration;

use crate::{Group, ParseError, RecipeDraft, WhiskError};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe group
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiGroup {
    pub name: String,
    pub items: Vec<String>,
}

/// FFI-compatible recipe draft
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeDraft {
    pub title: String,
    pub description: String,
    /// Empty string if the model gave no time
    pub total_time: String,
    /// Empty string if the model gave no servings
    pub servings: String,
    pub ingredient_groups: Vec<FfiGroup>,
    pub instruction_groups: Vec<FfiGroup>,
    pub tip_groups: Vec<FfiGroup>,
}

fn ffi_groups(groups: &[Group]) -> Vec<FfiGroup> {
    groups
        .iter()
        .map(|group| FfiGroup {
            name: group.name.clone(),
            items: group.items.clone(),
        })
        .collect()
}

impl From<&RecipeDraft> for FfiRecipeDraft {
    fn from(draft: &RecipeDraft) -> Self {
        FfiRecipeDraft {
            title: draft.title().to_string(),
            description: draft.description().to_string(),
            total_time: draft.total_time().unwrap_or_default().to_string(),
            servings: draft.servings().unwrap_or_default().to_string(),
            ingredient_groups: ffi_groups(draft.ingredient_groups()),
            instruction_groups: ffi_groups(draft.instruction_groups()),
            tip_groups: ffi_groups(draft.tip_groups()),
        }
    }
}

/// FFI-compatible provider enum
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiProvider {
    OpenAI,
    Anthropic,
    Ollama,
}

impl From<FfiProvider> for crate::Provider {
    fn from(provider: FfiProvider) -> Self {
        match provider {
            FfiProvider::OpenAI => crate::Provider::OpenAI,
            FfiProvider::Anthropic => crate::Provider::Anthropic,
            FfiProvider::Ollama => crate::Provider::Ollama,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiWhiskError {
    /// The completion was not a usable recipe; ask the user to rephrase
    CouldNotParse { message: String },
    /// The completion endpoint failed or timed out
    ProviderError { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiWhiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiWhiskError::CouldNotParse { message } => {
                write!(f, "Could not generate a recipe: {}", message)
            }
            FfiWhiskError::ProviderError { message } => write!(f, "Provider error: {}", message),
            FfiWhiskError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiWhiskError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiWhiskError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiWhiskError {}

impl From<ParseError> for FfiWhiskError {
    fn from(err: ParseError) -> Self {
        FfiWhiskError::CouldNotParse {
            message: err.to_string(),
        }
    }
}

impl From<WhiskError> for FfiWhiskError {
    fn from(err: WhiskError) -> Self {
        let message = err.to_string();
        match err {
            WhiskError::Parse(e) => e.into(),
            WhiskError::Request(_) | WhiskError::Provider(_) | WhiskError::Timeout(_) => {
                FfiWhiskError::ProviderError { message }
            }
            WhiskError::InvalidInput(_) => FfiWhiskError::InvalidInput { message },
            WhiskError::BuilderError(_)
            | WhiskError::EnvError(_)
            | WhiskError::ConfigError(_)
            | WhiskError::Store(_) => FfiWhiskError::ConfigError { message },
        }
    }
}

/// Configuration for generating recipes
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiGenerateConfig {
    /// Optional provider (uses default if not specified)
    pub provider: Option<FfiProvider>,
    /// Optional API key (uses environment variable if not specified)
    pub api_key: Option<String>,
    /// Optional model name (uses provider default if not specified)
    pub model: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
    /// Number of alternative recipes; 0 means one
    pub count: u32,
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiWhiskError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiWhiskError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Parse a raw completion into recipe drafts
///
/// Pure and synchronous; safe to call from any thread.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_completion_text(raw: String) -> Result<Vec<FfiRecipeDraft>, FfiWhiskError> {
    let recipes = crate::parse_completion(&raw)?;
    Ok(recipes.into_drafts().iter().map(FfiRecipeDraft::from).collect())
}

/// Generate recipes for a meal description
///
/// Blocks the calling thread until the completion is parsed; call it off the UI thread.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn generate_recipes(
    description: String,
    config: Option<FfiGenerateConfig>,
) -> Result<Vec<FfiRecipeDraft>, FfiWhiskError> {
    let rt = create_runtime()?;
    rt.block_on(async { generate_recipes_async(&description, config).await })
}

async fn generate_recipes_async(
    description: &str,
    config: Option<FfiGenerateConfig>,
) -> Result<Vec<FfiRecipeDraft>, FfiWhiskError> {
    let config = config.unwrap_or_default();

    let mut builder = crate::RecipeGenerator::builder()
        .description(description)
        .count(config.count.max(1) as usize);

    if let Some(provider) = config.provider {
        builder = builder.provider(provider.into());
    }

    if let Some(api_key) = config.api_key {
        builder = builder.api_key(api_key);
    }

    if let Some(model) = config.model {
        builder = builder.model(model);
    }

    if let Some(timeout_secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }

    let recipes = builder.build().await?;
    Ok(recipes.into_drafts().iter().map(FfiRecipeDraft::from).collect())
}
