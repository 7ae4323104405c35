use serde::{Deserialize, Serialize};

use crate::questions::{GeneratedQuestions, QuestionSource};
use crate::scoring::{ProductData, ScoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuestionsRequest {
    /// Free-text product description embedded into the prompt.
    #[serde(default)]
    pub product_info: String,
    /// Accepted for API compatibility; not used when generating.
    #[serde(default)]
    #[allow(dead_code)]
    pub previous_answers: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransparencyScoreRequest {
    #[serde(default)]
    pub product_data: ProductData,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub openai_status: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<String>,
    /// Only present when the static list was served.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
}

impl From<GeneratedQuestions> for QuestionsResponse {
    fn from(generated: GeneratedQuestions) -> Self {
        let source = match generated.source {
            QuestionSource::Model => None,
            QuestionSource::Fallback => Some("fallback"),
        };
        Self {
            success: true,
            questions: generated.questions,
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: ScoreResult,
}

impl From<ScoreResult> for ScoreResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}
