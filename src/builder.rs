use std::time::Duration;

use log::info;

use crate::config::{load_config, ProviderConfig};
use crate::parsing::parse_completion;
pub use crate::providers::Provider;
use crate::providers::{FallbackProvider, LlmProvider, RecipePrompt};
use crate::{ParsedRecipes, WhiskError};

/// Builder for generating recipes from a meal description
#[derive(Debug)]
pub struct RecipeGeneratorBuilder {
    description: Option<String>,
    count: usize,
    provider: Option<Provider>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl Default for RecipeGeneratorBuilder {
    fn default() -> Self {
        RecipeGeneratorBuilder {
            description: None,
            count: 1,
            provider: None,
            timeout: None,
            api_key: None,
            model: None,
            base_url: None,
        }
    }
}

impl RecipeGeneratorBuilder {
    /// Set the free-text meal description
    ///
    /// # Example
    /// ```
    /// use whisk::RecipeGenerator;
    ///
    /// let builder = RecipeGenerator::builder()
    ///     .description("something cozy with lentils");
    /// ```
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// The meal description set so far
    pub fn meal_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Ask for several alternative recipes in one completion
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the completion provider
    ///
    /// # Example
    /// ```
    /// use whisk::{Provider, RecipeGenerator};
    ///
    /// let builder = RecipeGenerator::builder()
    ///     .description("pad thai")
    ///     .provider(Provider::Anthropic);
    /// ```
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Give up on the completion after `duration`
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key instead of relying on environment variables or config files
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a custom or proxy endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Request the completion and parse it into recipe drafts
    ///
    /// # Errors
    /// Returns `WhiskError` if:
    /// - No description was given, or it is blank
    /// - The provider cannot be configured or the request fails
    /// - The completion does not arrive before the timeout
    /// - The completion cannot be parsed into at least one recipe
    ///
    /// # Example
    /// ```no_run
    /// # use whisk::RecipeGenerator;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipes = RecipeGenerator::builder()
    ///     .description("a spicy vegetarian chili")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ParsedRecipes, WhiskError> {
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| WhiskError::InvalidInput("Please describe your meal.".to_string()))?;

        if self.count == 0 {
            return Err(WhiskError::BuilderError(
                "Recipe count must be at least 1".to_string(),
            ));
        }

        let prompt = RecipePrompt::new(description, self.count);
        let (provider, configured_timeout) = self.resolve_provider()?;
        let timeout = self.timeout.unwrap_or(configured_timeout);

        info!(
            "Requesting {} recipe(s) from {}",
            prompt.count(),
            provider.provider_name()
        );
        let raw = tokio::time::timeout(timeout, provider.complete(&prompt))
            .await
            .map_err(|_| WhiskError::Timeout(timeout))?
            .map_err(|e| WhiskError::Provider(e.to_string()))?;

        let recipes = parse_completion(&raw)?;
        info!("Generated {} recipe(s)", recipes.len());
        Ok(recipes)
    }

    /// Provider from explicit builder settings, or from the loaded config.
    fn resolve_provider(&self) -> Result<(Box<dyn LlmProvider>, Duration), WhiskError> {
        let explicit = self.api_key.is_some() || self.model.is_some() || self.base_url.is_some();

        if explicit {
            let provider = self.provider.unwrap_or(Provider::OpenAI);
            let config = ProviderConfig {
                api_key: self.api_key.clone(),
                base_url: self.base_url.clone(),
                ..ProviderConfig::for_model(
                    self.model
                        .clone()
                        .unwrap_or_else(|| provider.default_model().to_string()),
                )
            };
            let provider = provider
                .create(&config)
                .map_err(|e| WhiskError::BuilderError(e.to_string()))?;
            return Ok((provider, DEFAULT_TIMEOUT));
        }

        let mut config = load_config()?;
        if let Some(provider) = self.provider {
            config.default_provider = provider.as_str().to_string();
            config.fallback.enabled = false;
        }
        let timeout = Duration::from_secs(config.timeout);
        let provider: Box<dyn LlmProvider> = Box::new(
            FallbackProvider::new(&config).map_err(|e| WhiskError::BuilderError(e.to_string()))?,
        );
        Ok((provider, timeout))
    }
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Main entry point for the builder API
pub struct RecipeGenerator;

impl RecipeGenerator {
    /// Creates a new builder for generating recipes
    ///
    /// # Example
    /// ```
    /// use whisk::RecipeGenerator;
    ///
    /// let builder = RecipeGenerator::builder();
    /// ```
    pub fn builder() -> RecipeGeneratorBuilder {
        RecipeGeneratorBuilder::default()
    }
}
