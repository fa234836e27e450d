//! knowdesk - company knowledge RAG assistant
//!
//! Ingests heterogeneous documents (PDF, DOCX, TXT, XLSX, CSV), splits them
//! into overlapping sentence-aligned chunks, indexes them by semantic
//! embedding, and answers chat questions grounded in the most relevant
//! chunks, with per-answer provenance.
//!
//! Ingestion path: extract -> normalize -> chunk -> embed (batched) -> index
//! insert. Query path: embed query -> nearest-neighbor search -> context
//! assembly -> completion call -> answer + provenance.

pub mod chat;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use chat::{ChatEngine, PromptBuilder, NO_CONTEXT_SENTINEL};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use ingestion::{IngestPipeline, TextChunker};
pub use retrieval::{RetrievedChunk, Retriever};
