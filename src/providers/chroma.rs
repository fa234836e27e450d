//! Chroma vector index client
//!
//! `connect()` resolves (get-or-create) the collection once at startup and
//! holds its id; operations never re-check initialization. The handle is
//! stateless HTTP, so shutdown is just dropping it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::types::ChunkMetadata;

use super::vector_index::{IndexEntry, IndexMatch, StoredChunk, VectorIndex};

/// HTTP client for a Chroma collection
#[derive(Debug)]
pub struct ChromaIndex {
    client: Client,
    base_url: String,
    collection_id: String,
    collection_name: String,
}

#[derive(Deserialize)]
struct CollectionInfo {
    id: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    documents: Vec<Vec<String>>,
    metadatas: Vec<Vec<Value>>,
    distances: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct GetResponse {
    ids: Vec<String>,
    documents: Vec<String>,
    metadatas: Vec<Value>,
}

impl ChromaIndex {
    /// Connect to the Chroma service and resolve the collection id.
    ///
    /// Creates the collection if it does not exist yet, requesting a
    /// cosine-distance metric space.
    pub async fn connect(config: &IndexConfig) -> Result<Self> {
        let client = Client::new();
        let base_url = config.base_url();
        let url = format!("{}/api/v1/collections", base_url);

        let response = client
            .post(&url)
            .json(&json!({
                "name": config.collection,
                "get_or_create": true,
                "metadata": {
                    "hnsw:space": "cosine",
                    "description": "Company knowledge base documents",
                },
            }))
            .send()
            .await
            .map_err(|e| Error::index(format!("Chroma connect failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::index(format!(
                "Chroma collection setup failed: {} - {}",
                status, body
            )));
        }

        let info: CollectionInfo = response
            .json()
            .await
            .map_err(|e| Error::index(format!("Failed to parse collection info: {}", e)))?;

        tracing::info!(
            "Connected to Chroma collection '{}' ({})",
            config.collection,
            info.id
        );

        Ok(Self {
            client,
            base_url,
            collection_id: info.id,
            collection_name: config.collection.clone(),
        })
    }

    fn collection_url(&self, operation: &str) -> String {
        format!(
            "{}/api/v1/collections/{}/{}",
            self.base_url, self.collection_id, operation
        )
    }

    async fn post_json(&self, operation: &str, body: Value) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.collection_url(operation))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::index(format!("Chroma {} failed: {}", operation, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::index(format!(
                "Chroma {} error: {} - {}",
                operation, status, body
            )));
        }

        Ok(response)
    }

    fn parse_metadata(value: Value) -> Result<ChunkMetadata> {
        serde_json::from_value(value)
            .map_err(|e| Error::index(format!("Malformed chunk metadata in index: {}", e)))
    }
}

#[async_trait]
impl VectorIndex for ChromaIndex {
    async fn insert_many(&self, entries: &[IndexEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        let embeddings: Vec<&[f32]> = entries.iter().map(|e| e.embedding.as_slice()).collect();
        let documents: Vec<&str> = entries.iter().map(|e| e.content.as_str()).collect();
        let metadatas: Vec<&ChunkMetadata> = entries.iter().map(|e| &e.metadata).collect();

        self.post_json(
            "add",
            json!({
                "ids": ids,
                "embeddings": embeddings,
                "documents": documents,
                "metadatas": metadatas,
            }),
        )
        .await?;

        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<IndexMatch>> {
        let response = self
            .post_json(
                "query",
                json!({
                    "query_embeddings": [embedding],
                    "n_results": k,
                    "include": ["documents", "metadatas", "distances"],
                }),
            )
            .await?;

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::index(format!("Failed to parse query response: {}", e)))?;

        // One query embedding in, one result row out.
        let (documents, metadatas, distances) = match (
            parsed.documents.into_iter().next(),
            parsed.metadatas.into_iter().next(),
            parsed.distances.into_iter().next(),
        ) {
            (Some(d), Some(m), Some(s)) => (d, m, s),
            _ => return Ok(Vec::new()),
        };

        documents
            .into_iter()
            .zip(metadatas)
            .zip(distances)
            .map(|((content, metadata), distance)| {
                Ok(IndexMatch {
                    content,
                    metadata: Self::parse_metadata(metadata)?,
                    distance,
                })
            })
            .collect()
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.post_json("delete", json!({ "ids": [id] })).await?;
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let response = self
            .client
            .get(self.collection_url("count"))
            .send()
            .await
            .map_err(|e| Error::index(format!("Chroma count failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::index(format!(
                "Chroma count error: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::index(format!("Failed to parse count: {}", e)))
    }

    async fn get_all(&self) -> Result<Vec<StoredChunk>> {
        let response = self
            .post_json("get", json!({ "include": ["documents", "metadatas"] }))
            .await?;

        let parsed: GetResponse = response
            .json()
            .await
            .map_err(|e| Error::index(format!("Failed to parse get response: {}", e)))?;

        parsed
            .ids
            .into_iter()
            .zip(parsed.documents)
            .zip(parsed.metadatas)
            .map(|((id, content), metadata)| {
                Ok(StoredChunk {
                    id,
                    content,
                    metadata: Self::parse_metadata(metadata)?,
                })
            })
            .collect()
    }

    fn name(&self) -> &str {
        &self.collection_name
    }
}
