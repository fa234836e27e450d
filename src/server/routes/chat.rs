//! Chat endpoint

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{
    response::{ChatResponse, ContextInfo},
    ChatMessage, Role,
};

/// Request for `POST /api/chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Full conversation so far, ending with the new user turn
    pub messages: Vec<ChatMessage>,
}

/// POST /api/chat - Answer a user message grounded in indexed documents
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let start = Instant::now();

    let user_message = request
        .messages
        .last()
        .ok_or_else(|| Error::validation("Messages array is required"))?;

    if user_message.role != Role::User {
        return Err(Error::validation("Latest message must be from user"));
    }

    let history = &request.messages[..request.messages.len() - 1];
    let answer = state.engine().answer(&user_message.content, history).await?;

    tracing::info!(
        "Chat answered in {}ms using {} source(s)",
        start.elapsed().as_millis(),
        answer.sources.len()
    );

    Ok(Json(ChatResponse {
        message: ChatMessage::assistant(answer.answer),
        context: ContextInfo {
            documents_used: answer.sources,
            context_used: answer.grounded,
        },
        timestamp: Utc::now(),
    }))
}
