use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::error::GenerationError;
use crate::openai::{ChatCompletionRequest, Message, OpenAiClient};

/// A single prompt/response exchange with a text-generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Narrow call-and-response capability over a language model.
///
/// Object safe so callers can hold `Arc<dyn TextGeneration>` and swap in a fake
/// in tests.
pub trait TextGeneration: Send + Sync {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> BoxFuture<'_, Result<String, GenerationError>>;
}

impl TextGeneration for OpenAiClient {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> BoxFuture<'_, Result<String, GenerationError>> {
        async move {
            let chat = ChatCompletionRequest {
                model: self.config().model.clone(),
                messages: vec![
                    Message {
                        role: "system".to_string(),
                        content: request.system,
                    },
                    Message {
                        role: "user".to_string(),
                        content: request.user,
                    },
                ],
                temperature: Some(request.temperature),
                max_tokens: Some(request.max_tokens),
            };
            let response = self.chat_completions(chat).await?;
            debug!(
                total_tokens = ?response.usage.as_ref().and_then(|u| u.total_tokens),
                "chat completion received"
            );

            response
                .choices
                .first()
                .and_then(|c| c.message.content.as_deref())
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .ok_or(GenerationError::EmptyCompletion)
        }
        .boxed()
    }
}
