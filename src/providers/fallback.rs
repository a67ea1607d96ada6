use crate::config::AiConfig;
use crate::providers::{LlmProvider, Provider, RecipePrompt};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;

pub struct FallbackProvider {
    providers: Vec<Box<dyn LlmProvider>>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FallbackProvider {
    /// Create a new fallback provider from configuration
    ///
    /// Providers without a `[providers.<name>]` section are built from
    /// defaults, so an environment API key is enough to get started.
    pub fn new(config: &AiConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if !config.fallback.enabled {
            // If fallback is disabled, just use the default provider
            let provider: Provider = config.default_provider.parse()?;
            return Ok(FallbackProvider {
                providers: vec![provider.from_config(config)?],
                retry_attempts: 1,
                retry_delay_ms: 0,
            });
        }

        let mut providers = Vec::new();

        // Create providers in fallback order
        for name in &config.fallback.order {
            let provider = match name.parse::<Provider>() {
                Ok(provider) => provider,
                Err(e) => {
                    warn!("Skipping '{}' in fallback order: {}", name, e);
                    continue;
                }
            };

            match provider.from_config(config) {
                Ok(client) => {
                    info!("Added '{}' to fallback chain", provider);
                    providers.push(client);
                }
                Err(e) => warn!("Failed to initialize provider '{}': {}", provider, e),
            }
        }

        Self::from_providers(
            providers,
            config.fallback.retry_attempts,
            config.fallback.retry_delay_ms,
        )
    }

    /// Chain already-built providers, tried first to last
    pub fn from_providers(
        providers: Vec<Box<dyn LlmProvider>>,
        retry_attempts: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if providers.is_empty() {
            return Err("No providers available in fallback configuration".into());
        }

        Ok(FallbackProvider {
            providers,
            retry_attempts: retry_attempts.max(1),
            retry_delay_ms,
        })
    }

    /// Try a provider, waiting a little longer before each retry
    async fn try_provider_with_retry(
        &self,
        provider: &dyn LlmProvider,
        prompt: &RecipePrompt,
    ) -> Result<String, String> {
        let mut last_error = String::new();

        for attempt in 1..=self.retry_attempts {
            debug!(
                "Requesting completion from {} (attempt {}/{})",
                provider.provider_name(),
                attempt,
                self.retry_attempts
            );

            match provider.complete(prompt).await {
                Ok(content) => {
                    info!("Received completion from {}", provider.provider_name());
                    return Ok(content);
                }
                Err(e) => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        provider.provider_name(),
                        attempt,
                        self.retry_attempts,
                        e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < self.retry_attempts {
                let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                debug!("Waiting {:?} before retry", delay);
                sleep(delay).await;
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl LlmProvider for FallbackProvider {
    fn provider_name(&self) -> &str {
        "fallback"
    }

    async fn complete(
        &self,
        prompt: &RecipePrompt,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let mut all_errors: Vec<String> = Vec::new();

        for provider in &self.providers {
            match self.try_provider_with_retry(provider.as_ref(), prompt).await {
                Ok(content) => return Ok(content),
                Err(e) => {
                    all_errors.push(format!("{}: {}", provider.provider_name(), e));
                }
            }
        }

        Err(format!("All providers failed:\n{}", all_errors.join("\n")).into())
    }
}
