use std::error::Error;
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::config::{AiConfig, ProviderConfig};
use crate::providers::{AnthropicProvider, LlmProvider, OllamaProvider, OpenAIProvider};

/// Completion endpoints whisk can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAI,
    Anthropic,
    Ollama,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAI, Provider::Anthropic, Provider::Ollama];

    /// Key used for this provider in config files and `WHISK__PROVIDERS__*`
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Ollama => "ollama",
        }
    }

    /// Model used when neither the builder nor the config names one
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4o",
            Provider::Anthropic => "claude-3-5-sonnet-20241022",
            Provider::Ollama => "llama3.1",
        }
    }

    /// Build a client for this endpoint from `config`
    ///
    /// API keys missing from `config` are read from `OPENAI_API_KEY` or
    /// `ANTHROPIC_API_KEY` by the client constructors.
    pub fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        if !config.enabled {
            return Err(format!("Provider '{}' is disabled in configuration", self).into());
        }

        let client: Box<dyn LlmProvider> = match self {
            Provider::OpenAI => Box::new(OpenAIProvider::new(config)?),
            Provider::Anthropic => Box::new(AnthropicProvider::new(config)?),
            Provider::Ollama => Box::new(OllamaProvider::new(config)?),
        };
        Ok(client)
    }

    /// Build a client from this provider's section of `config`, or from
    /// defaults when the section is missing.
    pub fn from_config(
        &self,
        config: &AiConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        match config.providers.get(self.as_str()) {
            Some(section) => self.create(section),
            None => {
                debug!("No [providers.{}] section, using defaults", self);
                self.create(&ProviderConfig::for_model(self.default_model()))
            }
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| format!("Unknown provider: {}", name))
    }
}
