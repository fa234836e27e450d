//! API routes

pub mod admin;
pub mod chat;
pub mod documents;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;

use crate::server::state::AppState;
use crate::types::response::HealthResponse;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Chat
        .route("/chat", post(chat::chat))
        // Document management
        .route(
            "/documents/upload",
            post(documents::upload).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/documents", get(documents::list))
        .route("/documents/search", get(documents::search))
        .route("/documents/:id", delete(documents::delete))
        // Admin
        .route("/admin/stats", get(admin::stats))
        .route("/admin/test-query", post(admin::test_query))
        // Health
        .route("/health", get(health))
}

/// GET /api/health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        uptime: state.uptime_secs(),
    })
}

/// GET / - Service info
pub async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "knowdesk",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Company knowledge RAG assistant",
        "endpoints": {
            "POST /api/chat": "Ask a question grounded in company documents",
            "POST /api/documents/upload": "Upload and index a document",
            "GET /api/documents": "List indexed documents",
            "GET /api/documents/search": "Semantic search without completion",
            "DELETE /api/documents/:id": "Delete one chunk",
            "GET /api/admin/stats": "Collection statistics",
            "POST /api/admin/test-query": "Retrieval test query",
            "GET /api/health": "Health check"
        }
    }))
}
