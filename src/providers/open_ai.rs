use crate::config::ProviderConfig;
use crate::providers::{LlmProvider, RecipePrompt};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or("OPENAI_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Create a new OpenAI provider with simple parameters
    pub fn with_api_key(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, "https://api.openai.com".to_string(), model)
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 800,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        prompt: &RecipePrompt,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": prompt.system()},
                    {"role": "user", "content": prompt.user()}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        let response_body: Value = response.json().await?;
        debug!("Full JSON response: {:?}", response_body);

        chat_completion_content(&response_body, status, "OpenAI")
    }
}

/// Pulls `choices[0].message.content` out of an OpenAI-compatible response.
pub(crate) fn chat_completion_content(
    body: &Value,
    status: reqwest::StatusCode,
    provider: &str,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    if let Some(message) = body["error"]["message"].as_str() {
        return Err(format!("Error from {}: {}", provider, message).into());
    }
    if !status.is_success() {
        return Err(format!("{} request failed with status: {}", provider, status).into());
    }

    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or("Failed to extract content from response")?;
    debug!("Raw content from API:\n{}", content);

    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(serde_json::json!({"model": "gpt-4o"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {
                            "content": "{\"title\": \"Pasta 🍝\", \"description\": \"Simple.\"}"
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o".to_string(),
        );

        let result = provider
            .complete(&RecipePrompt::new("pasta", 1))
            .await
            .unwrap();
        assert!(result.contains("Pasta 🍝"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_api_error_message() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o".to_string(),
        );

        let err = provider
            .complete(&RecipePrompt::new("pasta", 1))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error from OpenAI: Incorrect API key provided"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_bad_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o".to_string(),
        );

        let result = provider.complete(&RecipePrompt::new("pasta", 1)).await;
        assert!(result.is_err());
        mock.assert_async().await;
    }

    #[test]
    fn test_provider_name() {
        let provider =
            OpenAIProvider::with_api_key("fake_api_key".to_string(), "gpt-4o".to_string());
        assert_eq!(provider.provider_name(), "openai");
    }
}
