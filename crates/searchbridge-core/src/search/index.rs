//! Vector index client (Pinecone-style data-plane API)

use crate::config::IndexServiceConfig;
use crate::error::{Result, SearchBridgeError};
use crate::search::FilterPredicate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw match record returned by the index
#[derive(Debug, Clone, Deserialize)]
pub struct RawMatch {
    #[serde(default)]
    pub id: String,

    pub score: f32,

    /// Opaque metadata mapping stored alongside the vector
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Trait for filtered nearest-neighbor queries against a vector index
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Submit an embedding with a metadata filter, returning the `top_k`
    /// nearest matches ordered by descending score
    async fn query(
        &self,
        vector: &[f32],
        filter: &FilterPredicate,
        top_k: usize,
    ) -> Result<Vec<RawMatch>>;
}

/// Client for a managed Pinecone index
pub struct PineconeIndex {
    http_client: reqwest::Client,
    host: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    /// Always present: an unfiltered search submits `{}`
    filter: &'a FilterPredicate,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

impl PineconeIndex {
    /// Resolve the configured index via the control plane and build a
    /// data-plane client for it.
    ///
    /// Fails fast when the index does not exist so that a misconfigured
    /// deployment never starts serving.
    pub async fn connect(config: &IndexServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(SearchBridgeError::Http)?;

        let url = format!("{}/indexes/{}", config.controller_url, config.index);

        let response = http_client
            .get(&url)
            .header("Api-Key", &config.api_key)
            .send()
            .await
            .map_err(|e| SearchBridgeError::Index(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SearchBridgeError::Index(format!(
                "Index '{}' not found",
                config.index
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchBridgeError::Index(format!(
                "Failed to describe index '{}' (HTTP {}): {}",
                config.index, status, body
            )));
        }

        let described: DescribeIndexResponse = response
            .json()
            .await
            .map_err(|e| SearchBridgeError::Index(e.to_string()))?;

        tracing::info!(
            "Connected to index '{}' in {} at {}",
            config.index,
            config.environment,
            described.host
        );

        Ok(Self::with_host(
            http_client,
            described.host,
            config.api_key.clone(),
        ))
    }

    /// Build a client for an already-resolved data-plane host
    pub fn with_host(http_client: reqwest::Client, host: String, api_key: String) -> Self {
        // Control-plane describe returns a bare hostname
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host
        } else {
            format!("https://{}", host)
        };
        Self {
            http_client,
            host,
            api_key,
        }
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(
        &self,
        vector: &[f32],
        filter: &FilterPredicate,
        top_k: usize,
    ) -> Result<Vec<RawMatch>> {
        let request = QueryRequest {
            vector,
            top_k,
            filter,
            include_metadata: true,
        };

        let url = format!("{}/query", self.host);

        let response = self
            .http_client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchBridgeError::Index(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchBridgeError::Index(format!(
                "Index query failed (HTTP {}): {}",
                status, body
            )));
        }

        let query_response: QueryResponse = response
            .json()
            .await
            .map_err(|e| SearchBridgeError::Index(e.to_string()))?;

        Ok(query_response.matches)
    }
}
