//! Query embedding and nearest-neighbor search

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingBatcher, VectorIndex};
use crate::types::ChunkMetadata;

/// One retrieval hit with its similarity score
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    /// Chunk text
    pub content: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
    /// Similarity in [0, 1]; 1.0 is identical under cosine distance
    pub similarity: f32,
}

/// Embeds a query, asks the index for nearest neighbors, and converts the
/// index's native distance to a similarity score.
///
/// The index's own ranking order (nearest first) is preserved; no re-sort.
#[derive(Clone)]
pub struct Retriever {
    batcher: Arc<EmbeddingBatcher>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    /// Create a retriever over the embedding batcher and vector index
    pub fn new(batcher: Arc<EmbeddingBatcher>, index: Arc<dyn VectorIndex>) -> Self {
        Self { batcher, index }
    }

    /// Retrieve at most `k` chunks relevant to `query`.
    ///
    /// An empty index yields an empty Vec, not an error. Embedding or index
    /// failures propagate as [`Error::Retrieval`]; there is no retry.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        let embedding = self
            .batcher
            .embed_one(query)
            .await
            .map_err(|e| Error::retrieval(e.to_string()))?;

        let matches = self
            .index
            .query(&embedding, k)
            .await
            .map_err(|e| Error::retrieval(e.to_string()))?;

        tracing::debug!("Retrieved {} chunk(s) for query", matches.len());

        Ok(matches
            .into_iter()
            .map(|m| RetrievedChunk {
                content: m.content,
                metadata: m.metadata,
                similarity: 1.0 - m.distance,
            })
            .collect())
    }
}
