//! Document upload, listing, search, and delete endpoints

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::providers::IndexEntry;
use crate::server::state::AppState;
use crate::types::response::{
    ChunkPreview, ChunkView, DocumentGroup, DocumentListResponse, SearchHit, SearchResponse,
    UploadResponse,
};

/// Truncate to `limit` characters at a char boundary, appending an ellipsis
pub(crate) fn preview(content: &str, limit: usize) -> String {
    let cut: String = content.chars().take(limit).collect();
    format!("{}...", cut)
}

/// POST /api/documents/upload - Ingest one uploaded file
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();

    // First file field wins; clients send it under the "document" field name.
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("Failed to read multipart field: {}", e)))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::validation(format!("Failed to read file: {}", e)))?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| Error::validation("No file uploaded"))?;

    tracing::info!("Processing document: {} ({} bytes)", filename, data.len());

    let (_document, chunks) = state.pipeline().process(&filename, &data)?;

    // Embed every chunk before touching the index: a failed embedding run
    // leaves no partial chunk set behind.
    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let embeddings = state.batcher().embed_all(&texts).await?;

    let entries: Vec<IndexEntry> = chunks
        .iter()
        .zip(embeddings)
        .map(|(chunk, embedding)| IndexEntry {
            id: chunk.id.clone(),
            embedding,
            content: chunk.content.clone(),
            metadata: chunk.metadata(),
        })
        .collect();

    state.index().insert_many(&entries).await?;

    tracing::info!(
        "Indexed {} chunk(s) from {} in {}ms",
        chunks.len(),
        filename,
        start.elapsed().as_millis()
    );

    Ok(Json(UploadResponse {
        message: "Document uploaded and processed successfully".to_string(),
        filename,
        chunks: chunks.len(),
        documents: chunks
            .iter()
            .map(|chunk| ChunkPreview {
                id: chunk.id.clone(),
                preview: preview(&chunk.content, 200),
                chunk_index: chunk.chunk_index,
            })
            .collect(),
    }))
}

/// GET /api/documents - List all indexed chunks, grouped by filename
pub async fn list(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let stored = state.index().get_all().await?;
    let total = stored.len();

    let mut groups: BTreeMap<String, DocumentGroup> = BTreeMap::new();
    for chunk in stored {
        let group = groups
            .entry(chunk.metadata.filename.clone())
            .or_insert_with(|| DocumentGroup {
                filename: chunk.metadata.filename.clone(),
                format: chunk.metadata.format,
                created_at: chunk.metadata.created_at,
                chunks: Vec::new(),
            });
        group.chunks.push(ChunkView {
            id: chunk.id,
            content: chunk.content,
            chunk_index: chunk.metadata.chunk_index,
        });
    }

    for group in groups.values_mut() {
        group.chunks.sort_by_key(|c| c.chunk_index);
    }

    Ok(Json(DocumentListResponse {
        documents: groups.into_values().collect(),
        total,
    }))
}

/// Query parameters for `GET /api/documents/search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    5
}

/// GET /api/documents/search - Retrieval without a completion call
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    if params.query.trim().is_empty() {
        return Err(Error::validation("Search query is required"));
    }

    let results = state
        .retriever()
        .retrieve(&params.query, params.limit)
        .await?;

    Ok(Json(SearchResponse {
        query: params.query,
        results: results
            .into_iter()
            .map(|r| SearchHit {
                content: r.content,
                filename: r.metadata.filename,
                format: r.metadata.format,
                similarity: r.similarity,
                chunk_index: r.metadata.chunk_index,
            })
            .collect(),
    }))
}

/// DELETE /api/documents/:id - Delete one chunk by id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    state.index().delete(&id).await?;
    Ok(Json(json!({ "message": "Document deleted successfully" })))
}
