//! LLM-based metadata filter extraction from natural language queries

use super::{ChatMessage, LLMClient};
use crate::config::LLMServiceConfig;
use crate::error::{Result, SearchBridgeError};
use crate::search::FilterPredicate;
use async_trait::async_trait;
use std::sync::Arc;

/// System instruction for filter generation. Enumerates exactly the permitted
/// metadata fields and demands a JSON-only response.
const SYSTEM_PROMPT: &str = "\
You are a smart assistant that converts natural language search queries into \
JSON metadata filters for a vector index.
Use only the following metadata fields:
- author: string
- published_year: integer
- published_month: integer
- tags: list of strings
Return only the JSON.";

/// Trait for extracting metadata filters from query text
#[async_trait]
pub trait FilterExtractor: Send + Sync {
    /// Extract a filter predicate from the query.
    ///
    /// Infallible by contract: a broken filter must never block a search, so
    /// any provider or parse failure degrades to the empty predicate.
    async fn extract(&self, query: &str) -> FilterPredicate;
}

/// Filter extractor using an external HTTP LLM service
pub struct HttpFilterExtractor {
    client: Arc<dyn LLMClient>,
}

impl HttpFilterExtractor {
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
impl FilterExtractor for HttpFilterExtractor {
    async fn extract(&self, query: &str) -> FilterPredicate {
        let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(query)];

        let response = match self.client.chat_completion(messages).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Filter generation failed, searching unfiltered: {}", e);
                return FilterPredicate::default();
            }
        };

        match parse_filter_response(&response) {
            Ok(filter) => filter,
            Err(e) => {
                tracing::warn!("Filter parsing failed, searching unfiltered: {}", e);
                FilterPredicate::default()
            }
        }
    }
}

/// Parse the model's response text into a filter predicate.
///
/// The outermost `{..}` span is extracted so that markdown code fences or
/// stray prose around the JSON do not break parsing. The top-level value must
/// be an object; fields outside the allow-list are stripped.
fn parse_filter_response(response: &str) -> Result<FilterPredicate> {
    let json_str = match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => {
            return Err(SearchBridgeError::Provider(
                "No JSON object in filter response".to_string(),
            ))
        }
    };

    let value: serde_json::Value = serde_json::from_str(json_str)?;

    let object = value.as_object().ok_or_else(|| {
        SearchBridgeError::Provider("Filter response is not a JSON object".to_string())
    })?;

    Ok(FilterPredicate::from_object(object))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClient {
        response: Result<String>,
    }

    impl FixedClient {
        fn ok(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(SearchBridgeError::Provider("connection refused".to_string())),
            }
        }
    }

    #[async_trait]
    impl LLMClient for FixedClient {
        async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
            match &self.response {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(SearchBridgeError::Provider(e.to_string())),
            }
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            unimplemented!()
        }

        fn model_name(&self) -> &str {
            "test-chat"
        }

        fn embedding_model_name(&self) -> &str {
            "test-embed"
        }
    }

    #[tokio::test]
    async fn test_extracts_author_and_year() {
        let extractor = HttpFilterExtractor::new(Arc::new(FixedClient::ok(
            r#"{"author": "Jane Doe", "published_year": 2020}"#,
        )));

        let filter = extractor.extract("books by Jane Doe in 2020").await;
        assert_eq!(filter.author.as_deref(), Some("Jane Doe"));
        assert_eq!(filter.published_year, Some(2020));
        assert_eq!(filter.published_month, None);
        assert_eq!(filter.tags, None);
    }

    #[tokio::test]
    async fn test_malformed_response_degrades_to_empty() {
        let extractor = HttpFilterExtractor::new(Arc::new(FixedClient::ok("not json")));

        let filter = extractor.extract("anything").await;
        assert!(filter.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_empty() {
        let extractor = HttpFilterExtractor::new(Arc::new(FixedClient::failing()));

        let filter = extractor.extract("anything").await;
        assert!(filter.is_empty());
    }

    #[test]
    fn test_parse_strips_markdown_fences() {
        let response = "```json\n{\"author\": \"Jane Doe\"}\n```";
        let filter = parse_filter_response(response).unwrap();
        assert_eq!(filter.author.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_parse_rejects_non_object_top_level() {
        assert!(parse_filter_response("[1, 2, 3]").is_err());
        assert!(parse_filter_response("\"author\"").is_err());
    }

    #[test]
    fn test_parse_rejects_truncated_json() {
        assert!(parse_filter_response("{\"author\": ").is_err());
    }

    #[test]
    fn test_parse_strips_unknown_fields() {
        let response = r#"{"author": "Jane Doe", "publisher": "Acme", "rating": 5}"#;
        let filter = parse_filter_response(response).unwrap();
        assert_eq!(filter.author.as_deref(), Some("Jane Doe"));
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({"author": "Jane Doe"})
        );
    }

    #[test]
    fn test_parse_drops_wrong_typed_values() {
        let response = r#"{"author": 42, "published_year": "two thousand", "tags": ["rust", 7]}"#;
        let filter = parse_filter_response(response).unwrap();
        assert_eq!(filter.author, None);
        assert_eq!(filter.published_year, None);
        assert_eq!(filter.tags, Some(vec!["rust".to_string()]));
    }
}
