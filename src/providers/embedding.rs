//! Embedding provider trait and the rate-limited batcher built on it

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

/// Trait for generating text embeddings
///
/// Implementations:
/// - `JinaEmbedder`: Jina AI embeddings API
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for a batch of texts in one provider call.
    /// Output order matches input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embedding dimensions (768 for jina-embeddings-v2-base-en)
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Groups texts into fixed-size provider batches, issued sequentially with a
/// fixed delay between calls to respect upstream rate limits.
///
/// Any batch failure fails the whole call; callers must not have persisted
/// anything before `embed_all` returns, so an aborted batch set leaves no
/// partial state behind.
pub struct EmbeddingBatcher {
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
    batch_delay: Duration,
}

impl EmbeddingBatcher {
    /// Create a batcher over a provider
    pub fn new(provider: Arc<dyn EmbeddingProvider>, batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            provider,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// Create a batcher from configuration
    pub fn from_config(provider: Arc<dyn EmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        Self::new(provider, config.batch_size, config.batch_delay())
    }

    /// Embed every text, preserving order: one output vector per input.
    pub async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        let mut batches = texts.chunks(self.batch_size).peekable();

        while let Some(batch) = batches.next() {
            let vectors = self.provider.embed_batch(batch).await?;

            if vectors.len() != batch.len() {
                return Err(Error::embedding(format!(
                    "{} returned {} vectors for {} inputs",
                    self.provider.name(),
                    vectors.len(),
                    batch.len()
                )));
            }
            embeddings.extend(vectors);

            if batches.peek().is_some() {
                sleep(self.batch_delay).await;
            }
        }

        Ok(embeddings)
    }

    /// Embed a single text (one-element batch)
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let vectors = self.embed_all(std::slice::from_ref(&text.to_string())).await?;
        vectors
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding(format!("{} returned no vector", self.provider.name())))
    }

    /// Dimensions of the underlying provider
    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }
}
