//! Document ingestion: extraction, normalization, and chunking

pub mod chunker;
pub mod extractor;
pub mod normalize;

pub use chunker::TextChunker;
pub use extractor::DocumentExtractor;
pub use normalize::normalize;

use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Chunk, Document};

/// Source tag stamped onto chunks created from uploads
const UPLOAD_SOURCE: &str = "upload";

/// The ingestion pipeline: extract, normalize, chunk, and assemble chunk
/// records ready for embedding and index insertion.
pub struct IngestPipeline {
    chunker: TextChunker,
}

impl IngestPipeline {
    /// Create a pipeline around a configured chunker
    pub fn new(chunker: TextChunker) -> Self {
        Self { chunker }
    }

    /// Process one uploaded file into a document and its chunk records.
    ///
    /// Chunk ordinals are assigned after the short-fragment filter, so the
    /// kept sequence is gapless and strictly increasing.
    pub fn process(&self, filename: &str, data: &[u8]) -> Result<(Document, Vec<Chunk>)> {
        let (format, raw) = DocumentExtractor::extract(filename, data)?;
        let cleaned = normalize(&raw);
        let pieces = self.chunker.chunk(&cleaned);

        let document_id = Uuid::new_v4();
        let created_at = Utc::now();

        let chunks: Vec<Chunk> = pieces
            .into_iter()
            .enumerate()
            .map(|(index, content)| Chunk {
                id: format!("{}-chunk-{}", document_id, index),
                filename: filename.to_string(),
                chunk_index: index,
                content,
                format,
                created_at,
                source: UPLOAD_SOURCE.to_string(),
            })
            .collect();

        let document = Document {
            filename: filename.to_string(),
            format,
            created_at,
        };

        tracing::debug!(
            "Ingested {} as {} chunk(s) ({:?})",
            filename,
            chunks.len(),
            format
        );

        Ok((document, chunks))
    }
}
