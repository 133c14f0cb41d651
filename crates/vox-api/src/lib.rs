//! Vox API: REST + WebSocket transport over the dispatcher.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod ws;

use axum::routing::{get, post};
use axum::Router;
use metrics::Metrics;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vox_dispatch::Dispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            metrics: Arc::new(Metrics::new()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/command", post(handlers::command))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/health", get(handlers::health))
        .route("/api/commands", get(handlers::commands))
        .route("/api/sessions", get(handlers::sessions))
        .route("/api/conversation/:session_id", get(handlers::conversation))
        .route(
            "/api/conversation/:session_id/export",
            get(handlers::export_conversation),
        )
        .route("/metrics", get(handlers::metrics))
        .route("/ws/:client_id", get(ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("vox api listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
