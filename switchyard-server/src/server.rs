use crate::config::ServerConfig;
use crate::hub::HubHandle;
use crate::routing::SignalRouter;
use crate::signaling::ws_handler;
use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::path::Path;
use switchyard_core::PeerSummary;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub hub: HubHandle,
}

/// HTTP surface: the signaling socket, the peer listing, and optionally a
/// static directory for everything else.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/ws", get(ws_handler))
        .route("/peers", get(list_peers));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_peers(
    State(state): State<AppState>,
) -> Result<Json<Vec<PeerSummary>>, StatusCode> {
    state.hub.list_peers().await.map(Json).map_err(|e| {
        error!("Failed to list peers: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;

    serve_with_listener(listener, config).await
}

/// Serves on an already bound listener. `config.host`/`config.port` are
/// ignored here.
pub async fn serve_with_listener(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    let hub = HubHandle::spawn(SignalRouter::new(config.mode));
    let app = app(AppState { hub }, config.static_dir.as_deref());

    let addr = listener
        .local_addr()
        .context("listener has no local address")?;
    info!(
        "Signaling server ({} mode) listening on http://{}",
        config.mode, addr
    );

    axum::serve(listener, app)
        .await
        .context("signaling server stopped")
}
