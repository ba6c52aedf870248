use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::ServerConfig, relay::RoomRegistry, state_store::RoomStateStore};

pub use self::search::{SearchClient, SearchResult};

mod search;
mod ws;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
    pub state_store: Arc<RoomStateStore>,
    pub search: Arc<SearchClient>,
    pub quit_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(config: &ServerConfig, quit_tx: broadcast::Sender<()>) -> Self {
        AppState {
            registry: Arc::new(RoomRegistry::new()),
            state_store: Arc::new(RoomStateStore::new()),
            search: Arc::new(SearchClient::new(&config.search_upstream)),
            quit_tx,
        }
    }
}

/// Builds the HTTP surface: the per-room WebSocket endpoint and the video
/// search proxy, behind the permissive CORS policy the browser frontend
/// relies on.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(search::search_handler))
        .route("/ws/{room_id}", get(ws::ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
