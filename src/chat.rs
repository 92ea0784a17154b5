use std::sync::Arc;

use crate::config::ChatConfig;
use crate::error::{GuidanceError, Result};
use crate::models::{ChatMessage, ChatRequest};
use crate::transport::Transport;

/// Client for the chat completion endpoint.
///
/// Sampling parameters come from configuration; callers choose the model and
/// token budget per request (the conversational and prayer paths differ).
pub struct ChatClient {
    tx: Arc<dyn Transport>,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
}

impl ChatClient {
    pub fn new(tx: Arc<dyn Transport>, cfg: &ChatConfig) -> Self {
        Self {
            tx,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            frequency_penalty: cfg.frequency_penalty,
        }
    }

    /// Send `messages` and return the first choice's content, trimmed.
    ///
    /// `messages` must be non-empty; by convention the first entry is the
    /// system prompt. Failures come back as tagged errors, never as text
    /// pretending to be an assistant reply.
    pub async fn complete(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> Result<String> {
        if messages.is_empty() {
            return Err(GuidanceError::Internal(
                "chat request requires at least one message".to_string(),
            ));
        }

        let request = ChatRequest {
            model: model.to_string(),
            messages,
            max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            stream: false,
        };

        tracing::info!(model, max_tokens, "Sending chat completion request");
        let response = self.tx.chat(&request).await?;

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.trim().to_string()),
            None => Err(GuidanceError::UnexpectedResponse {
                raw: "chat endpoint returned no choices".to_string(),
            }),
        }
    }
}
