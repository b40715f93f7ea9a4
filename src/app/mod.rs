//! HTTP surface: static UI, health checks, barcode lookup and CSV upload.

pub mod handlers;
pub mod upload;

use crate::adapters::LocalStorage;
use crate::config::AppConfig;
use crate::core::resolver::Resolver;
use crate::utils::error::{AppError, Result};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub uploads: LocalStorage,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(resolver: Resolver, uploads: LocalStorage, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            uploads,
            static_dir: static_dir.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let resolver = Resolver::from_config(config)?;
        Ok(Self::new(
            resolver,
            LocalStorage::new(config.upload_dir()),
            config.static_dir(),
        ))
    }
}

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/api/health", get(handlers::health))
        .route("/api/lookup", get(handlers::lookup))
        .route(
            "/upload-csv",
            post(upload::upload_csv).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // "/" 與其他路徑交給靜態檔案目錄處理
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(config: AppConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    tracing::info!(
        "🔌 Enabled providers: {}",
        state.resolver.enabled_providers().join(", ")
    );
    if !state.static_dir.join("index.html").exists() {
        tracing::warn!("No index.html under {}", state.static_dir.display());
    }

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::ConfigError {
            message: format!("Failed to bind to {}: {}", addr, e),
        })?;
    tracing::info!("🚀 Listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
