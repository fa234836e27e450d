//! knowdesk server binary
//!
//! Run with: cargo run --bin knowdesk-server

use knowdesk::{config::AppConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "knowdesk=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                        knowdesk                           ║
║        Company Knowledge Assistant with Grounded Chat     ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    let config = AppConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embedding.model);
    tracing::info!("  - Embedding dimensions: {}", config.embedding.dimensions);
    tracing::info!("  - Chat backend: {:?} ({})", config.completion.backend, config.completion.model);
    tracing::info!("  - Chunk size: {} (overlap {})", config.chunking.chunk_size, config.chunking.chunk_overlap);
    tracing::info!("  - Vector index: {} (collection {})", config.index.base_url(), config.index.collection);

    if config.embedding.api_key.is_empty() {
        tracing::warn!("JINA_API_KEY is not set; embedding calls will fail");
    }
    if config.completion.openrouter_api_key.is_empty()
        && config.completion.openai_api_key.is_empty()
    {
        tracing::warn!("No completion API key set (OPENROUTER_API_KEY / OPENAI_API_KEY)");
    }

    let server = RagServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/api/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/chat              - Ask questions");
    println!("  POST /api/documents/upload  - Upload documents");
    println!("  GET  /api/documents         - List documents");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
