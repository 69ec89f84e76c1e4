mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod synthesis;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::description::{DescriptionSource, FallbackOnly, LlmDescriber};
use crate::generation::summary::RandomTemplate;
use crate::layout::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Description collaborator: one instance per process, HTTP client built on first use
    let describer: Arc<dyn DescriptionSource> = match &config.anthropic_api_key {
        Some(key) => {
            info!(
                "LLM description source enabled (model: {}, timeout: {}s)",
                llm_client::MODEL,
                config.description_timeout.as_secs()
            );
            Arc::new(LlmDescriber::new(key.clone()))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; blank descriptions use the fallback text");
            Arc::new(FallbackOnly)
        }
    };

    let page_config = default_page_config(config.paper_size);
    info!(
        "Page config: {:?} {}x{}pt, body {}pt",
        page_config.paper, page_config.width_pt, page_config.height_pt, page_config.body_size_pt
    );

    let state = AppState {
        config: config.clone(),
        describer,
        template_selector: Arc::new(RandomTemplate),
        page_config,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
