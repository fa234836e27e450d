//! Core types for documents, chunks, conversations, and API responses

pub mod chat;
pub mod document;
pub mod response;

pub use chat::{ChatAnswer, ChatMessage, Role, SourceRef};
pub use document::{Chunk, ChunkMetadata, Document, DocumentFormat};
