//! newsrelay API server
//!
//! HTTP server exposing keyword news search, web research, keyword
//! extraction, and Slack relay of aggregated results.

mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

use newsrelay_core::{AppConfig, Clock, SystemClock};
use newsrelay_services::SearchService;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<SearchService>,
    pub clock: Arc<dyn Clock>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,newsrelay_api=debug")),
        )
        .init();

    info!("Starting newsrelay API");

    let config = AppConfig::from_env();

    // Log which optional providers are available
    if config.naver.is_some() {
        info!("Naver news credentials found in environment");
    } else {
        info!("No Naver credentials found - commercial news search will be unavailable");
    }
    if config.google_search.is_some() {
        info!("Google search credentials found in environment");
    } else {
        info!("No Google search credentials found - research search will be unavailable");
    }
    if config.slack_webhook_url.is_some() {
        info!("Slack webhook configured - results will be relayed");
    } else {
        info!("No Slack webhook configured - notifications disabled");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let search_service = Arc::new(SearchService::new(&config, clock.clone()));

    let state = AppState {
        search_service,
        clock,
    };

    // Configure CORS for browser clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    let app = Router::new()
        .merge(routes::api_routes())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
