//! Collaborator traits and their HTTP provider implementations

pub mod chroma;
pub mod completion;
pub mod embedding;
pub mod jina;
pub mod openai;
pub mod openrouter;
pub mod vector_index;

pub use chroma::ChromaIndex;
pub use completion::CompletionProvider;
pub use embedding::{EmbeddingBatcher, EmbeddingProvider};
pub use jina::JinaEmbedder;
pub use openai::OpenAiCompleter;
pub use openrouter::OpenRouterCompleter;
pub use vector_index::{IndexEntry, IndexMatch, StoredChunk, VectorIndex};
