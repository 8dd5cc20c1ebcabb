//! Configuration management
//!
//! All configuration is read from environment variables at startup. Provider
//! credentials are required; model identifiers and endpoints have sensible
//! defaults for the hosted OpenAI and Pinecone services.

use crate::error::{Result, SearchBridgeError};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// LLM service configuration (embeddings + filter generation)
    pub llm: LLMServiceConfig,

    /// Vector index service configuration
    pub index: IndexServiceConfig,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the OpenAI-compatible service
    pub url: String,

    /// Model name for chat completions (filter generation)
    pub model: String,

    /// Model name for embeddings
    pub embedding_model: String,

    /// API key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Vector index service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexServiceConfig {
    /// Control-plane URL used to resolve the index host at startup
    pub controller_url: String,

    /// Name of the index to query
    pub index: String,

    /// Region label of the index deployment
    pub environment: String,

    /// API key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails fast when a required credential is missing so that a
    /// misconfigured deployment never starts serving.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            llm: LLMServiceConfig::from_env()?,
            index: IndexServiceConfig::from_env()?,
        })
    }
}

impl LLMServiceConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            model: std::env::var("SEARCHBRIDGE_CHAT_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            embedding_model: std::env::var("SEARCHBRIDGE_EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-ada-002".to_string()),
            api_key: required_var("OPENAI_API_KEY")?,
            timeout_secs: default_timeout(),
        })
    }
}

impl IndexServiceConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            controller_url: std::env::var("PINECONE_CONTROLLER_URL")
                .unwrap_or_else(|_| "https://api.pinecone.io".to_string()),
            index: std::env::var("PINECONE_INDEX").unwrap_or_else(|_| "articles".to_string()),
            environment: std::env::var("PINECONE_ENV")
                .unwrap_or_else(|_| "us-east-1-aws".to_string()),
            api_key: required_var("PINECONE_API_KEY")?,
            timeout_secs: default_timeout(),
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| SearchBridgeError::Config(format!("{} is not set", name)))
}

fn default_timeout() -> u64 {
    std::env::var("SEARCHBRIDGE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30)
}
