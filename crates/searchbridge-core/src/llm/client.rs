//! HTTP client for OpenAI-compatible LLM services

use crate::config::LLMServiceConfig;
use crate::error::{Result, SearchBridgeError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Trait for LLM service clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a chat completion for the given messages
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get chat model name
    fn model_name(&self) -> &str;

    /// Get embedding model name
    fn embedding_model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// OpenAI-compatible client
pub struct OpenAIClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
}

impl OpenAIClient {
    /// Create new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(SearchBridgeError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest {
            model: String,
            messages: Vec<ChatMessage>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessage,
        }

        // Deterministic decoding: the only chat consumer is filter extraction
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: 0.0,
        };

        let url = format!("{}/v1/chat/completions", self.config.url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchBridgeError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchBridgeError::Provider(format!(
                "LLM service error (HTTP {}): {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| SearchBridgeError::Provider(e.to_string()))?;

        let content = chat_response
            .choices
            .first()
            .ok_or_else(|| SearchBridgeError::Provider("No response from LLM".to_string()))?
            .message
            .content
            .clone();

        Ok(content)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct EmbedRequest {
            model: String,
            input: Vec<String>,
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            data: Vec<EmbedData>,
        }

        #[derive(Deserialize)]
        struct EmbedData {
            embedding: Vec<f32>,
        }

        let request = EmbedRequest {
            model: self.config.embedding_model.clone(),
            input: vec![text.to_string()],
        };

        let url = format!("{}/v1/embeddings", self.config.url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchBridgeError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchBridgeError::Provider(format!(
                "Embedding service error (HTTP {}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| SearchBridgeError::Provider(e.to_string()))?;

        embed_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| SearchBridgeError::Provider("No embedding returned".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn embedding_model_name(&self) -> &str {
        &self.config.embedding_model
    }
}
