//! Searchbridge server
//!
//! Natural-language search over a managed vector index.

use anyhow::Result;
use clap::Parser;
use searchbridge_core::{
    Config, HttpEmbedder, HttpFilterExtractor, LLMClient, OpenAIClient, PineconeIndex,
    SearchPipeline,
};
use std::sync::Arc;
use tracing::info;

mod routes;

use routes::AppState;

#[derive(Parser)]
#[command(name = "searchbridge")]
#[command(
    author,
    version,
    about = "Natural-language search over a managed vector index"
)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "SEARCHBRIDGE_BIND", default_value = "0.0.0.0:8080")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;

    let llm: Arc<dyn LLMClient> = Arc::new(OpenAIClient::new(config.llm.clone())?);

    // Resolves the index host and fails fast if the index does not exist
    let index = PineconeIndex::connect(&config.index).await?;

    let pipeline = SearchPipeline::new(
        Arc::new(HttpEmbedder::new(llm.clone())),
        Arc::new(HttpFilterExtractor::new(llm)),
        Arc::new(index),
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    info!("Listening on {}", cli.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
