//! Searchbridge Core Library
//!
//! Query understanding and filtered vector search over a managed index.
//!
//! # Features
//! - Embedding generation via OpenAI-compatible services
//! - LLM-driven extraction of metadata filters from natural language
//! - Filtered nearest-neighbor queries against a Pinecone-style index
//! - A pipeline that degrades to unfiltered search when extraction fails

pub mod config;
pub mod error;
pub mod llm;
pub mod search;

pub use config::{Config, IndexServiceConfig, LLMServiceConfig};
pub use error::{Error, Result, SearchBridgeError};
pub use llm::{
    ChatMessage, Embedder, FilterExtractor, HttpEmbedder, HttpFilterExtractor, LLMClient,
    OpenAIClient,
};
pub use search::{
    FilterPredicate, MatchResult, PineconeIndex, RawMatch, SearchPipeline, SearchResponse,
    VectorIndex, DEFAULT_TOP_K,
};
