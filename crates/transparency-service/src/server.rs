use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::error::AppError;
use crate::model::{
    GenerateQuestionsRequest, QuestionsResponse, ScoreResponse, StatusResponse,
    TransparencyScoreRequest,
};
use crate::questions::QuestionGenerator;
use crate::scoring;

/// Read-only per-process state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub questions: QuestionGenerator,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/generate-questions", post(generate_questions))
        .route("/transparency-score", post(transparency_score))
        .with_state(state)
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "AI Service is running",
        openai_status: state.questions.is_available(),
    })
}

async fn generate_questions(
    State(state): State<AppState>,
    payload: Result<Json<GenerateQuestionsRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let Json(request) = payload?;
    let generated = state.questions.generate(&request.product_info).await;
    debug!(source = ?generated.source, "questions served");
    Ok(Json(generated.into()))
}

async fn transparency_score(
    payload: Result<Json<TransparencyScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Json(request) = payload?;
    let result = scoring::calculate_score(&request.product_data);
    debug!(score = result.score, grade = result.grade.label(), "transparency score computed");
    Ok(Json(result.into()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
