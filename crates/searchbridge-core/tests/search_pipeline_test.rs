//! End-to-end pipeline tests with a fake LLM service and index.
//!
//! The real adapters (HttpEmbedder, HttpFilterExtractor) run over a canned
//! LLM client, so the full query-understanding path is exercised without a
//! network.

use async_trait::async_trait;
use searchbridge_core::{
    ChatMessage, Embedder, FilterExtractor, FilterPredicate, HttpEmbedder, HttpFilterExtractor,
    LLMClient, RawMatch, Result, SearchBridgeError, SearchPipeline, VectorIndex,
};
use std::sync::{Arc, Mutex};

/// LLM client with canned chat and embedding responses
struct CannedLLM {
    chat_response: std::result::Result<String, String>,
    embedding: std::result::Result<Vec<f32>, String>,
}

#[async_trait]
impl LLMClient for CannedLLM {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        self.chat_response
            .clone()
            .map_err(SearchBridgeError::Provider)
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.embedding.clone().map_err(SearchBridgeError::Provider)
    }

    fn model_name(&self) -> &str {
        "canned-chat"
    }

    fn embedding_model_name(&self) -> &str {
        "canned-embed"
    }
}

/// Index that records every query it receives
#[derive(Default)]
struct RecordingIndex {
    queries: Mutex<Vec<(Vec<f32>, FilterPredicate, usize)>>,
    matches: Vec<serde_json::Value>,
}

#[async_trait]
impl VectorIndex for RecordingIndex {
    async fn query(
        &self,
        vector: &[f32],
        filter: &FilterPredicate,
        top_k: usize,
    ) -> Result<Vec<RawMatch>> {
        self.queries
            .lock()
            .unwrap()
            .push((vector.to_vec(), filter.clone(), top_k));
        self.matches
            .iter()
            .map(|m| serde_json::from_value(m.clone()).map_err(SearchBridgeError::Serialization))
            .collect()
    }
}

fn build_pipeline(
    chat_response: std::result::Result<String, String>,
    embedding: std::result::Result<Vec<f32>, String>,
    index: Arc<RecordingIndex>,
) -> SearchPipeline {
    let client: Arc<dyn LLMClient> = Arc::new(CannedLLM {
        chat_response,
        embedding,
    });
    SearchPipeline::new(
        Arc::new(HttpEmbedder::new(client.clone())),
        Arc::new(HttpFilterExtractor::new(client)),
        index,
    )
}

#[tokio::test]
async fn extracted_filter_reaches_the_index_verbatim() {
    let index = Arc::new(RecordingIndex {
        matches: vec![serde_json::json!({
            "id": "a1",
            "score": 0.93,
            "metadata": {"title": "Learning Systems", "author": "Jane Doe", "tags": ["ml"]}
        })],
        ..Default::default()
    });
    let pipeline = build_pipeline(
        Ok(r#"{"author": "Jane Doe", "published_year": 2020}"#.to_string()),
        Ok(vec![0.1, 0.2, 0.3]),
        index.clone(),
    );

    let response = pipeline.search("books by Jane Doe in 2020", 5).await.unwrap();

    let queries = index.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    let (vector, filter, top_k) = &queries[0];
    assert_eq!(vector, &vec![0.1, 0.2, 0.3]);
    assert_eq!(*top_k, 5);
    assert_eq!(
        serde_json::to_value(filter).unwrap(),
        serde_json::json!({"author": "Jane Doe", "published_year": 2020})
    );

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].author, "Jane Doe");
    assert_eq!(response.results[0].tags, vec!["ml".to_string()]);
}

#[tokio::test]
async fn malformed_filter_output_falls_back_to_unfiltered_search() {
    let index = Arc::new(RecordingIndex::default());
    let pipeline = build_pipeline(Ok("not json".to_string()), Ok(vec![0.5]), index.clone());

    let response = pipeline.search("anything at all", 3).await.unwrap();
    assert!(response.results.is_empty());

    let queries = index.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].1.is_empty());
}

#[tokio::test]
async fn chat_failure_falls_back_to_unfiltered_search() {
    let index = Arc::new(RecordingIndex::default());
    let pipeline = build_pipeline(
        Err("rate limited".to_string()),
        Ok(vec![0.5]),
        index.clone(),
    );

    pipeline.search("anything", 2).await.unwrap();
    assert!(index.queries.lock().unwrap()[0].1.is_empty());
}

#[tokio::test]
async fn embedding_failure_surfaces_and_skips_the_index() {
    let index = Arc::new(RecordingIndex::default());
    let pipeline = build_pipeline(
        Ok("{}".to_string()),
        Err("upstream unavailable".to_string()),
        index.clone(),
    );

    let err = pipeline.search("anything", 5).await.unwrap_err();
    assert!(matches!(err, SearchBridgeError::Provider(_)));
    assert!(index.queries.lock().unwrap().is_empty());
}
