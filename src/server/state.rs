//! Application state wired once at startup

use std::sync::Arc;
use std::time::Instant;

use crate::chat::ChatEngine;
use crate::config::{AppConfig, CompletionBackend};
use crate::error::Result;
use crate::ingestion::{IngestPipeline, TextChunker};
use crate::providers::{
    ChromaIndex, CompletionProvider, EmbeddingBatcher, EmbeddingProvider, JinaEmbedder,
    OpenAiCompleter, OpenRouterCompleter, VectorIndex,
};
use crate::retrieval::Retriever;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    index: Arc<dyn VectorIndex>,
    batcher: Arc<EmbeddingBatcher>,
    pipeline: IngestPipeline,
    retriever: Retriever,
    engine: ChatEngine,
    started_at: Instant,
}

impl AppState {
    /// Construct every component once and wire them together.
    ///
    /// Provider selection happens here, at process configuration time: the
    /// handlers only ever see the trait objects.
    pub async fn new(config: AppConfig) -> Result<Self> {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(JinaEmbedder::new(&config.embedding));
        tracing::info!(
            "Embedding provider: {} ({}d)",
            embedder.name(),
            embedder.dimensions()
        );

        let completer: Arc<dyn CompletionProvider> = match config.completion.backend {
            CompletionBackend::OpenRouter => {
                Arc::new(OpenRouterCompleter::new(&config.completion))
            }
            CompletionBackend::OpenAi => Arc::new(OpenAiCompleter::new(&config.completion)),
        };
        tracing::info!(
            "Completion provider: {} ({})",
            completer.name(),
            completer.model()
        );

        let index: Arc<dyn VectorIndex> = Arc::new(ChromaIndex::connect(&config.index).await?);

        let batcher = Arc::new(EmbeddingBatcher::from_config(
            Arc::clone(&embedder),
            &config.embedding,
        ));
        let pipeline = IngestPipeline::new(TextChunker::from_config(&config.chunking));
        let retriever = Retriever::new(Arc::clone(&batcher), Arc::clone(&index));
        let engine = ChatEngine::new(retriever.clone(), completer, &config.retrieval);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                index,
                batcher,
                pipeline,
                retriever,
                engine,
                started_at: Instant::now(),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the vector index handle
    pub fn index(&self) -> &Arc<dyn VectorIndex> {
        &self.inner.index
    }

    /// Get the embedding batcher
    pub fn batcher(&self) -> &EmbeddingBatcher {
        &self.inner.batcher
    }

    /// Get the ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Get the retriever
    pub fn retriever(&self) -> &Retriever {
        &self.inner.retriever
    }

    /// Get the chat engine
    pub fn engine(&self) -> &ChatEngine {
        &self.inner.engine
    }

    /// Seconds since the server started
    pub fn uptime_secs(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }
}
