//! Conversation types shared by the chat engine and the completion providers

use serde::{Deserialize, Serialize};

/// Message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User turn
    User,
    /// Assistant turn
    Assistant,
}

/// One turn of a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it
    pub role: Role,
    /// What they said
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Provenance record: which chunk grounded an answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    /// Owning document filename
    pub filename: String,
    /// Similarity score of the retrieved chunk
    pub similarity: f32,
    /// Ordinal of the chunk within its document
    pub chunk_index: usize,
}

/// Final answer produced by the chat engine
#[derive(Debug, Clone)]
pub struct ChatAnswer {
    /// Generated answer text
    pub answer: String,
    /// Whether any document context grounded the answer
    pub grounded: bool,
    /// One record per retrieved chunk, in rank order
    pub sources: Vec<SourceRef>,
}
