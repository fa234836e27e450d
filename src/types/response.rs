//! HTTP response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::chat::{ChatMessage, SourceRef};
use super::document::DocumentFormat;

/// Response for `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant reply
    pub message: ChatMessage,
    /// Which documents grounded the reply
    pub context: ContextInfo,
    /// When the answer was produced
    pub timestamp: DateTime<Utc>,
}

/// Grounding info attached to a chat response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    /// Retrieved chunks, in rank order
    pub documents_used: Vec<SourceRef>,
    /// Whether any context was retrieved at all
    pub context_used: bool,
}

/// Response for `POST /api/documents/upload`
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    /// Number of chunks created
    pub chunks: usize,
    /// Preview of each stored chunk
    pub documents: Vec<ChunkPreview>,
}

/// Short preview of a stored chunk
#[derive(Debug, Serialize)]
pub struct ChunkPreview {
    pub id: String,
    pub preview: String,
    pub chunk_index: usize,
}

/// Response for `GET /api/documents`
#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentGroup>,
    /// Total number of indexed chunks
    pub total: usize,
}

/// All chunks of one uploaded file, grouped by filename
#[derive(Debug, Serialize)]
pub struct DocumentGroup {
    pub filename: String,
    #[serde(rename = "type")]
    pub format: DocumentFormat,
    pub created_at: DateTime<Utc>,
    pub chunks: Vec<ChunkView>,
}

/// One chunk in a document listing
#[derive(Debug, Serialize)]
pub struct ChunkView {
    pub id: String,
    pub content: String,
    pub chunk_index: usize,
}

/// Response for `GET /api/documents/search`
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// One retrieval hit in a search response
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub content: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub format: DocumentFormat,
    pub similarity: f32,
    pub chunk_index: usize,
}

/// Response for `GET /api/admin/stats`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_chunks: usize,
    /// Chunk counts per format tag
    pub file_types: BTreeMap<String, usize>,
    /// Chunk counts per upload date (YYYY-MM-DD)
    pub uploads_by_date: BTreeMap<String, usize>,
    /// Ten most recent uploads
    pub recent_uploads: Vec<RecentUpload>,
}

/// Entry in the recent-uploads list
#[derive(Debug, Serialize)]
pub struct RecentUpload {
    pub filename: String,
    #[serde(rename = "type")]
    pub format: DocumentFormat,
    pub created_at: DateTime<Utc>,
}

/// Response for `POST /api/admin/test-query`
#[derive(Debug, Serialize)]
pub struct TestQueryResponse {
    pub query: String,
    pub results: Vec<TestQueryHit>,
}

/// One hit in an admin test query, with a shortened preview
#[derive(Debug, Serialize)]
pub struct TestQueryHit {
    pub content: String,
    pub filename: String,
    pub similarity: f32,
    pub chunk_index: usize,
}

/// Response for `GET /api/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started
    pub uptime: u64,
}
