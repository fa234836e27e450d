//! Admin endpoints: collection stats and retrieval test queries

use axum::{extract::State, Json};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::response::{RecentUpload, StatsResponse, TestQueryHit, TestQueryResponse};

use super::documents::preview;

/// GET /api/admin/stats - Collection statistics
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let total_chunks = state.index().count().await?;
    let stored = state.index().get_all().await?;

    let mut file_types: BTreeMap<String, usize> = BTreeMap::new();
    let mut uploads_by_date: BTreeMap<String, usize> = BTreeMap::new();

    for chunk in &stored {
        *file_types
            .entry(chunk.metadata.format.as_str().to_string())
            .or_insert(0) += 1;
        let date = chunk.metadata.created_at.format("%Y-%m-%d").to_string();
        *uploads_by_date.entry(date).or_insert(0) += 1;
    }

    let mut by_recency = stored;
    by_recency.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));

    let recent_uploads = by_recency
        .into_iter()
        .take(10)
        .map(|chunk| RecentUpload {
            filename: chunk.metadata.filename,
            format: chunk.metadata.format,
            created_at: chunk.metadata.created_at,
        })
        .collect();

    Ok(Json(StatsResponse {
        total_chunks,
        file_types,
        uploads_by_date,
        recent_uploads,
    }))
}

/// Request for `POST /api/admin/test-query`
#[derive(Debug, Deserialize)]
pub struct TestQueryRequest {
    pub query: String,
}

/// POST /api/admin/test-query - Run a retrieval-only query with previews
pub async fn test_query(
    State(state): State<AppState>,
    Json(request): Json<TestQueryRequest>,
) -> Result<Json<TestQueryResponse>> {
    if request.query.trim().is_empty() {
        return Err(Error::validation("Query is required"));
    }

    let k = state.config().retrieval.search_top_k;
    let results = state.retriever().retrieve(&request.query, k).await?;

    Ok(Json(TestQueryResponse {
        query: request.query,
        results: results
            .into_iter()
            .map(|r| TestQueryHit {
                content: preview(&r.content, 300),
                filename: r.metadata.filename,
                similarity: r.similarity,
                chunk_index: r.metadata.chunk_index,
            })
            .collect(),
    }))
}
