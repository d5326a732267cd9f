use crate::config::Config;
use crate::controller::search_blocks;
use crate::omdb::{OmdbApi, OmdbClient};
use crate::render;
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub omdb: Arc<dyn OmdbApi>,
    pub placeholder: String,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    s: String,
}

pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    let omdb: Arc<dyn OmdbApi> = Arc::new(OmdbClient::new(&config)?);
    info!("Using OMDb endpoint {}", config.base_url);

    let state = AppState {
        omdb,
        placeholder: config.placeholder.clone(),
    };
    let app = build_app(state, &config.assets_dir);

    info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

// Traced last so the static fallback is covered as well as the routes.
pub fn build_app(state: AppState, assets_dir: &str) -> Router {
    build_router(state)
        .fallback_service(ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search))
        .route("/health", get(health))
        .with_state(state)
}

async fn index() -> Result<Html<String>, StatusCode> {
    render::index_page().map(Html).map_err(|e| {
        error!("Failed to render index page: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn health() -> &'static str {
    "OK"
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, StatusCode> {
    let blocks = search_blocks(state.omdb.as_ref(), &params.s, &state.placeholder).await;
    render::to_html(&blocks)
        .or_else(|e| {
            error!("Failed to render results for '{}': {:?}", params.s, e);
            render::to_html(&render::render_failure())
        })
        .map(Html)
        .map_err(|e| {
            error!("Failed to render fallback message: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutdown signal received");
}
