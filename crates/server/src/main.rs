//! Askbridge server
//!
//! Main entry point for the askbridge answer gateway: a single `/ask`
//! endpoint that retrieves context from a hosted search collection and
//! synthesizes an answer through a hosted completion model.

mod routes;
mod state;

use std::sync::Arc;

use clap::Parser;

use askbridge_core::{config::AppConfig, logging, AppResult};
use askbridge_llm::create_client;
use askbridge_prompt::FieldMap;
use askbridge_search::ElasticClient;
use state::AppState;

/// Askbridge - retrieval-augmented answer gateway
#[derive(Parser, Debug)]
#[command(name = "askbridge")]
#[command(about = "Retrieval-augmented answer gateway", long_about = None)]
#[command(version)]
struct Cli {
    /// Interface to bind (default: all interfaces)
    #[arg(long, env = "ASKBRIDGE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "ASKBRIDGE_PORT")]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // A .env file stands in for real environment in development
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Fails here, before binding, when a required secret is missing
    let config = AppConfig::load()?.with_overrides(cli.host, cli.port, cli.log_level, cli.no_color);

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Askbridge starting");
    tracing::debug!("Search endpoint: {}", config.search.endpoint);
    tracing::debug!("Collection: {}", config.search.collection);
    tracing::debug!("Model: {}", config.completion.model);

    let search = ElasticClient::new(
        &config.search.endpoint,
        &config.search.collection,
        &config.search.api_key,
    )?;

    let completion = create_client(
        "openai",
        config.completion.endpoint.as_deref(),
        Some(&config.completion.api_key),
    )?;

    let state = Arc::new(AppState::new(
        Arc::new(search),
        completion,
        FieldMap::default(),
        &config.completion.model,
    ));

    let app = routes::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
