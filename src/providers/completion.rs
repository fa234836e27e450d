//! Completion provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ChatMessage;

/// Trait for single-shot chat completion
///
/// Implementations:
/// - `OpenRouterCompleter`: OpenRouter chat completions API
/// - `OpenAiCompleter`: OpenAI chat completions API
///
/// Selected once at process configuration time; there is no per-call
/// provider branching or failover.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for an ordered message list
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
