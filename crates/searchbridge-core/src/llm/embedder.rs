//! HTTP-based embedder using an external LLM service

use super::LLMClient;
use crate::config::LLMServiceConfig;
use crate::error::{Result, SearchBridgeError};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Convert text into a fixed-length embedding vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get model name
    fn model_name(&self) -> String;
}

/// Embedder that uses an external HTTP service
pub struct HttpEmbedder {
    client: Arc<dyn LLMClient>,
}

impl HttpEmbedder {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: LLMServiceConfig) -> Result<Self> {
        let client = super::OpenAIClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(SearchBridgeError::InvalidRequest(
                "Cannot embed empty text".to_string(),
            ));
        }
        self.client.embed(text).await
    }

    fn model_name(&self) -> String {
        self.client.embedding_model_name().to_string()
    }
}
