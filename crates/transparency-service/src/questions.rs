/// Assessment-question generation with a static fallback.
///
/// The model path is optional. When it is missing, slow, failing, or returns
/// anything other than `{"questions": [five strings]}`, callers still get the
/// fixed question list; this module never returns an error.
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use llm_common::error::GenerationError;
use llm_common::generation::{CompletionRequest, TextGeneration};

pub const QUESTION_COUNT: usize = 5;

pub const FALLBACK_QUESTIONS: [&str; QUESTION_COUNT] = [
    "What are the main ingredients or materials used in this product?",
    "Where is this product manufactured and by whom?",
    "Does this product have any certifications (organic, fair trade, cruelty-free, etc.)?",
    "What is the environmental impact of producing this product?",
    "Are there any health or safety considerations consumers should know about?",
];

const SYSTEM_PROMPT: &str =
    "You are a product transparency expert. Always respond with valid JSON only.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuestions {
    pub questions: Vec<String>,
    pub source: QuestionSource,
}

impl GeneratedQuestions {
    pub fn fallback() -> Self {
        Self {
            questions: FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            source: QuestionSource::Fallback,
        }
    }
}

/// Why the model answer was not used.
#[derive(Debug, thiserror::Error)]
pub enum FallbackReason {
    #[error("text generation is not configured")]
    Unavailable,

    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("text generation timed out after {0:?}")]
    TimedOut(Duration),

    #[error("model output is not the expected JSON object: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model returned {0} questions, expected 5")]
    WrongCount(usize),
}

#[derive(Debug, Deserialize)]
struct ModelQuestions {
    questions: Vec<String>,
}

#[derive(Clone)]
pub struct QuestionGenerator {
    backend: Option<Arc<dyn TextGeneration>>,
    timeout: Duration,
}

impl QuestionGenerator {
    pub fn new(backend: Option<Arc<dyn TextGeneration>>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Whether the model path is enabled for this process.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn generate(&self, product_info: &str) -> GeneratedQuestions {
        match self.ask_model(product_info).await {
            Ok(questions) => {
                info!(count = questions.len(), "questions generated by model");
                GeneratedQuestions {
                    questions,
                    source: QuestionSource::Model,
                }
            }
            Err(FallbackReason::Unavailable) => {
                debug!("text generation not configured, using fallback questions");
                GeneratedQuestions::fallback()
            }
            Err(reason) => {
                warn!(reason = %reason, "question generation failed, using fallback questions");
                GeneratedQuestions::fallback()
            }
        }
    }

    async fn ask_model(&self, product_info: &str) -> Result<Vec<String>, FallbackReason> {
        let backend = self.backend.as_ref().ok_or(FallbackReason::Unavailable)?;

        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_prompt(product_info),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let text = tokio::time::timeout(self.timeout, backend.complete(request))
            .await
            .map_err(|_| FallbackReason::TimedOut(self.timeout))??;

        parse_questions(&text)
    }
}

pub fn build_prompt(product_info: &str) -> String {
    format!(
        "Generate 5 specific questions about this product to assess transparency.\n\n\
Product: {product_info}\n\n\
Return ONLY a valid JSON object in this exact format:\n\
{{\"questions\": [\"question1\", \"question2\", \"question3\", \"question4\", \"question5\"]}}\n\n\
Focus on: ingredients, manufacturing, certifications, sustainability, and health impacts."
    )
}

fn parse_questions(text: &str) -> Result<Vec<String>, FallbackReason> {
    let parsed: ModelQuestions = serde_json::from_str(text.trim())?;
    if parsed.questions.len() != QUESTION_COUNT {
        return Err(FallbackReason::WrongCount(parsed.questions.len()));
    }
    Ok(parsed.questions)
}


#[cfg(test)]
mod tests {
    use super::fake::{Reply, ScriptedGeneration};
    use super::*;

    const MODEL_ANSWER: &str = r#"{"questions": ["q1", "q2", "q3", "q4", "q5"]}"#;

    fn generator_with(backend: Arc<ScriptedGeneration>) -> QuestionGenerator {
        let backend: Arc<dyn TextGeneration> = backend;
        QuestionGenerator::new(Some(backend), Duration::from_secs(5))
    }

    fn assert_fallback(generated: &GeneratedQuestions) {
        assert_eq!(generated.source, QuestionSource::Fallback);
        assert_eq!(generated.questions, FALLBACK_QUESTIONS);
    }

    #[tokio::test]
    async fn unavailable_backend_uses_fallback() {
        let generator = QuestionGenerator::new(None, Duration::from_secs(5));
        assert!(!generator.is_available());

        for info in ["", "Organic shampoo", "{\"questions\": []}"] {
            assert_fallback(&generator.generate(info).await);
        }
    }

    #[tokio::test]
    async fn model_questions_are_returned_in_order() {
        let backend = Arc::new(ScriptedGeneration::text(&format!("\n  {MODEL_ANSWER}\n")));
        let generated = generator_with(backend).generate("Shampoo").await;

        assert_eq!(generated.source, QuestionSource::Model);
        assert_eq!(generated.questions, vec!["q1", "q2", "q3", "q4", "q5"]);
    }

    #[tokio::test]
    async fn request_embeds_product_info_and_fixed_parameters() {
        let backend = Arc::new(ScriptedGeneration::text(MODEL_ANSWER));
        generator_with(Arc::clone(&backend))
            .generate("Bamboo toothbrush by EcoCo")
            .await;

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.system, SYSTEM_PROMPT);
        assert!(request.user.contains("Product: Bamboo toothbrush by EcoCo\n"));
        assert_eq!(request.temperature, TEMPERATURE);
        assert_eq!(request.max_tokens, MAX_TOKENS);
    }

    #[tokio::test]
    async fn invalid_json_uses_fallback() {
        let backend = Arc::new(ScriptedGeneration::text("Sure! Here are five questions: ..."));
        assert_fallback(&generator_with(backend).generate("Shampoo").await);
    }

    #[tokio::test]
    async fn missing_questions_key_uses_fallback() {
        let backend = Arc::new(ScriptedGeneration::text(r#"{"items": ["a"]}"#));
        assert_fallback(&generator_with(backend).generate("Shampoo").await);
    }

    #[tokio::test]
    async fn wrong_question_count_uses_fallback() {
        let backend = Arc::new(ScriptedGeneration::text(r#"{"questions": ["a", "b"]}"#));
        assert_fallback(&generator_with(backend).generate("Shampoo").await);
    }

    #[tokio::test]
    async fn well_formed_json_of_the_wrong_shape_uses_fallback() {
        for answer in [
            r#"{"questions": [1, 2, 3, 4, 5]}"#,
            r#"["q1", "q2", "q3", "q4", "q5"]"#,
            r#"{"questions": "q1 q2 q3 q4 q5"}"#,
        ] {
            let backend = Arc::new(ScriptedGeneration::text(answer));
            assert_fallback(&generator_with(backend).generate("Shampoo").await);
        }
    }

    #[test]
    fn parse_rejects_non_string_questions() {
        let err = parse_questions(r#"{"questions": ["a", "b", 3, "d", "e"]}"#).unwrap_err();
        assert!(matches!(err, FallbackReason::Malformed(_)));
    }

    #[tokio::test]
    async fn generation_error_uses_fallback() {
        let backend = Arc::new(ScriptedGeneration::new(Reply::EmptyCompletion));
        assert_fallback(&generator_with(backend).generate("Shampoo").await);
    }

    #[tokio::test]
    async fn slow_backend_times_out_to_fallback() {
        let backend: Arc<dyn TextGeneration> = Arc::new(ScriptedGeneration::new(Reply::Hang));
        let generator = QuestionGenerator::new(Some(backend), Duration::from_millis(20));
        assert_fallback(&generator.generate("Shampoo").await);
    }

    #[test]
    fn parse_reports_wrong_count() {
        let err = parse_questions(r#"{"questions": []}"#).unwrap_err();
        assert!(matches!(err, FallbackReason::WrongCount(0)));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt("Soap"), build_prompt("Soap"));
        assert!(build_prompt("Soap").contains(r#"{"questions": ["question1""#));
    }
}
