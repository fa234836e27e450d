//! Embedding-similarity retrieval

pub mod search;

pub use search::{RetrievedChunk, Retriever};
