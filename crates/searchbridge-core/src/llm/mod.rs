//! LLM integration
//!
//! Provides traits and implementations for:
//! - Embedding generation via external services (OpenAI-compatible)
//! - Metadata filter extraction from natural language queries

mod client;
mod embedder;
mod filter_extractor;

pub use client::{ChatMessage, LLMClient, OpenAIClient};
pub use embedder::{Embedder, HttpEmbedder};
pub use filter_extractor::{FilterExtractor, HttpFilterExtractor};
