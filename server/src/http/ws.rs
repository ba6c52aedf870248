use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
};

use crate::session;

use super::AppState;

/// Upgrades `GET /ws/{room_id}` and hands the socket to the session loop.
/// The room key is whatever opaque string the client put in the path; a room
/// springs into existence the first time anyone references it.
pub(super) async fn ws_handler(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let quit_rx = state.quit_tx.subscribe();

    ws.on_upgrade(move |socket| {
        session::handle_session(socket, room_id, state.registry, state.state_store, quit_rx)
    })
}
