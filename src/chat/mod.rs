//! The query orchestrator: retrieve, assemble, complete, attach provenance

pub mod prompt;

pub use prompt::{AssembledPrompt, PromptBuilder, NO_CONTEXT_SENTINEL};

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::{Error, Result};
use crate::providers::CompletionProvider;
use crate::retrieval::Retriever;
use crate::types::{ChatAnswer, ChatMessage, SourceRef};

/// Coordinates retrieval, context assembly, and the completion call, and
/// shapes the final answer with provenance metadata.
///
/// Stateless; built once at startup and shared. The completion provider is a
/// static per-process choice with no per-call failover.
#[derive(Clone)]
pub struct ChatEngine {
    retriever: Retriever,
    prompt: PromptBuilder,
    completer: Arc<dyn CompletionProvider>,
    top_k: usize,
    history_limit: usize,
}

impl ChatEngine {
    /// Wire the engine from its collaborators and retrieval configuration
    pub fn new(
        retriever: Retriever,
        completer: Arc<dyn CompletionProvider>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            retriever,
            prompt: PromptBuilder::new(config.completion_window),
            completer,
            top_k: config.chat_top_k,
            history_limit: config.history_limit,
        }
    }

    /// Answer a user message grounded in retrieved document context.
    ///
    /// `history` is the prior conversation, oldest first, without the new
    /// user turn. Only the most recent turns up to the retention cap are
    /// considered; the completion call itself sees a smaller trailing window.
    pub async fn answer(&self, user_message: &str, history: &[ChatMessage]) -> Result<ChatAnswer> {
        if user_message.trim().is_empty() {
            return Err(Error::validation("Message must not be empty"));
        }

        let results = self.retriever.retrieve(user_message, self.top_k).await?;

        let retained = if history.len() > self.history_limit {
            &history[history.len() - self.history_limit..]
        } else {
            history
        };

        let assembled = self.prompt.assemble(&results, retained, user_message);

        tracing::info!(
            "Answering with {} context chunk(s) via {}",
            results.len(),
            self.completer.name()
        );

        let answer = self.completer.complete(&assembled.messages).await?;
        if answer.trim().is_empty() {
            return Err(Error::completion(format!(
                "{} returned an empty answer",
                self.completer.name()
            )));
        }

        let sources = results
            .iter()
            .map(|r| SourceRef {
                filename: r.metadata.filename.clone(),
                similarity: r.similarity,
                chunk_index: r.metadata.chunk_index,
            })
            .collect();

        Ok(ChatAnswer {
            answer,
            grounded: !results.is_empty(),
            sources,
        })
    }
}
