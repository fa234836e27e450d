//! Context and prompt assembly for grounded chat

use crate::retrieval::RetrievedChunk;
use crate::types::{ChatMessage, Role};

/// Context placeholder when retrieval found nothing relevant
pub const NO_CONTEXT_SENTINEL: &str = "No specific company documents found for this query.";

/// Everything the completion call needs, assembled from retrieval results and
/// bounded conversation history.
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    /// Concatenated chunk context (or the no-documents sentinel)
    pub context: String,
    /// System instruction wrapping the context
    pub system_prompt: String,
    /// `[system] ++ trailing history ++ new user turn`, windowed
    pub messages: Vec<ChatMessage>,
}

/// Pure assembler for grounding context, system instruction, and the
/// windowed message list sent to the completion provider.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    /// Trailing turns (including the new user turn) passed to the model
    window: usize,
}

impl PromptBuilder {
    /// Create a builder with the given completion window
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Concatenate retrieved chunks into grounding context, in rank order
    pub fn build_context(results: &[RetrievedChunk]) -> String {
        if results.is_empty() {
            return NO_CONTEXT_SENTINEL.to_string();
        }

        results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                format!(
                    "Document {} ({}):\n{}",
                    i + 1,
                    result.metadata.filename,
                    result.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Wrap the context with the fixed grounding instruction
    pub fn build_system_prompt(context: &str) -> String {
        format!(
            r#"You are a helpful company assistant with access to company documents and policies. Use the following context to answer questions accurately.

CONTEXT:
{context}

INSTRUCTIONS:
- Use the provided context to answer questions whenever possible
- If the context contains relevant information, reference it in your response
- If the question is not covered in the available context, say "I don't have specific information about that in the company documents"
- Be concise, helpful, and professional
- Always maintain a professional tone appropriate for workplace communication
- If referencing specific documents, mention the source when helpful

Remember: You are representing the company, so ensure all responses are appropriate and accurate based on the available information."#
        )
    }

    /// Assemble the full prompt: context, system instruction, and the
    /// windowed message list ending with the new user turn.
    pub fn assemble(
        &self,
        results: &[RetrievedChunk],
        history: &[ChatMessage],
        user_message: &str,
    ) -> AssembledPrompt {
        let context = Self::build_context(results);
        let system_prompt = Self::build_system_prompt(&context);

        let mut turns: Vec<ChatMessage> = history.to_vec();
        turns.push(ChatMessage::user(user_message));

        let start = turns.len().saturating_sub(self.window);
        let mut messages = Vec::with_capacity(self.window + 1);
        messages.push(ChatMessage {
            role: Role::System,
            content: system_prompt.clone(),
        });
        messages.extend(turns.drain(start..));

        AssembledPrompt {
            context,
            system_prompt,
            messages,
        }
    }
}
