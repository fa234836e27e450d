//! Vector index trait and its entry/match types

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ChunkMetadata;

/// A chunk ready for insertion into the index
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Chunk id
    pub id: String,
    /// Embedding vector
    pub embedding: Vec<f32>,
    /// Chunk text
    pub content: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
}

/// One nearest-neighbor match, as returned by the index
#[derive(Debug, Clone)]
pub struct IndexMatch {
    /// Chunk text
    pub content: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
    /// Native distance under the index metric (cosine)
    pub distance: f32,
}

/// A stored chunk from a full listing
#[derive(Debug, Clone)]
pub struct StoredChunk {
    /// Chunk id
    pub id: String,
    /// Chunk text
    pub content: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
}

/// Trait for the external nearest-neighbor index.
///
/// The metric space is assumed to be cosine distance; that is a collaborator
/// configuration invariant, not something enforced here. Read-your-writes
/// consistency across concurrent requests is likewise the index's concern.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert a batch of entries in one call
    async fn insert_many(&self, entries: &[IndexEntry]) -> Result<()>;

    /// Insert one entry (one-element batch)
    async fn insert(&self, entry: IndexEntry) -> Result<()> {
        self.insert_many(std::slice::from_ref(&entry)).await
    }

    /// Nearest-neighbor query for the top `k` matches, nearest first
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<IndexMatch>>;

    /// Delete one chunk by id
    async fn delete(&self, id: &str) -> Result<()>;

    /// Total number of stored chunks
    async fn count(&self) -> Result<usize>;

    /// List every stored chunk
    async fn get_all(&self) -> Result<Vec<StoredChunk>>;

    /// Index name for logging
    fn name(&self) -> &str;
}
