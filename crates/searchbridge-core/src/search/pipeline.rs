//! Query pipeline and result assembly
//!
//! Orchestrates embedding generation, filter extraction, and the vector index
//! query, then shapes raw matches into the stable response form.

use crate::error::{Result, SearchBridgeError};
use crate::llm::{Embedder, FilterExtractor};
use crate::search::index::{RawMatch, VectorIndex};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Default number of results when the request does not specify one
pub const DEFAULT_TOP_K: i64 = 5;

/// Sentinel for metadata fields absent from the underlying record
const MISSING_FIELD: &str = "N/A";

/// A ranked search result enriched from index metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f32,
    pub title: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// Response body for a search: matches in descending-score order as returned
/// by the index, no re-sorting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<MatchResult>,
}

/// The two-stage query-understanding pipeline feeding a filtered
/// nearest-neighbor search.
///
/// All collaborators are injected so tests can substitute fakes.
pub struct SearchPipeline {
    embedder: Arc<dyn Embedder>,
    filter_extractor: Arc<dyn FilterExtractor>,
    index: Arc<dyn VectorIndex>,
}

impl SearchPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        filter_extractor: Arc<dyn FilterExtractor>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            embedder,
            filter_extractor,
            index,
        }
    }

    /// Run a search for the given query text.
    ///
    /// Embedding and filter extraction are independent and run concurrently.
    /// An embedding failure propagates before the index is touched; filter
    /// extraction never fails (it degrades to an unfiltered search).
    pub async fn search(&self, query: &str, top_k: i64) -> Result<SearchResponse> {
        if top_k <= 0 {
            return Err(SearchBridgeError::InvalidRequest(format!(
                "top_k must be positive, got {}",
                top_k
            )));
        }
        if query.trim().is_empty() {
            return Err(SearchBridgeError::InvalidRequest(
                "Query text must not be empty".to_string(),
            ));
        }

        let (embedding, filter) = tokio::join!(
            self.embedder.embed(query),
            self.filter_extractor.extract(query),
        );
        let embedding = embedding?;

        tracing::debug!(
            "Querying index: dims={}, top_k={}, filtered={}",
            embedding.len(),
            top_k,
            !filter.is_empty()
        );

        let matches = self.index.query(&embedding, &filter, top_k as usize).await?;

        Ok(SearchResponse {
            results: matches.into_iter().map(assemble_match).collect(),
        })
    }
}

/// Shape a raw index match into the stable output form, substituting
/// sentinels for absent metadata
fn assemble_match(raw: RawMatch) -> MatchResult {
    let metadata = raw.metadata.unwrap_or_default();

    let text_field = |name: &str| -> String {
        metadata
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or(MISSING_FIELD)
            .to_string()
    };

    MatchResult {
        score: raw.score,
        title: text_field("title"),
        author: text_field("author"),
        tags: metadata
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}
