mod anthropic;
mod factory;
mod fallback;
mod ollama;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::Provider;
pub use fallback::FallbackProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{RecipePrompt, SYSTEM_PROMPT};

use async_trait::async_trait;
use std::error::Error;

/// Unified trait for all completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send the prompt and return the raw text content of the completion
    async fn complete(&self, prompt: &RecipePrompt)
        -> Result<String, Box<dyn Error + Send + Sync>>;
}
