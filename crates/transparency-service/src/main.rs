mod config;
mod error;
mod model;
mod questions;
mod scoring;
mod server;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use llm_common::generation::TextGeneration;
use llm_common::openai::{OpenAiClient, OpenAiClientConfig};

use config::Config;
use questions::QuestionGenerator;
use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal in deployed environments.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting transparency service");

    let config = Config::from_env()?;

    let openai_config = OpenAiClientConfig::from_env();
    let timeout = openai_config.default_timeout;
    info!(
        base_url = %openai_config.base_url,
        model = %openai_config.model,
        timeout_ms = timeout.as_millis(),
        "openai client configured"
    );

    // Decided once; the model path stays off for the process lifetime if this fails.
    let backend: Option<Arc<dyn TextGeneration>> = match OpenAiClient::new(openai_config) {
        Ok(client) => Some(Arc::new(client) as Arc<dyn TextGeneration>),
        Err(e) => {
            warn!(error = %e, "openai unavailable, serving fallback questions only");
            None
        }
    };
    let questions = QuestionGenerator::new(backend, timeout);
    info!(openai_available = questions.is_available(), "question generator ready");

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    server::serve(listener, AppState { questions })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "server error"))?;

    info!("server shut down");
    Ok(())
}
