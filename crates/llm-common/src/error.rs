/// Error types shared by text-generation consumers.
///
/// Provider-specific failures (HTTP, upstream status, decoding) live in
/// `OpenAiClientError`; `GenerationError` is what the `TextGeneration` seam hands
/// back to callers, so a service never has to name the concrete provider.
use crate::openai::OpenAiClientError;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    OpenAi(#[from] OpenAiClientError),

    #[error("completion contained no text")]
    EmptyCompletion,
}
