use std::sync::Arc;

use anyhow::Context;
use axum::extract::ws::{Message, WebSocket};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use nanoid::nanoid;
use protocol::{command::PlayerCommand, event::PlayerEvent};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{relay::RoomRegistry, state_store::RoomStateStore};

use self::watch_session::WatchSession;

mod watch_session;

/// Given an accepted WebSocket and the shared room components, drives a single
/// participant session until the peer disconnects, the transport fails, or the
/// server shuts down. Deregistration runs on every one of those exit paths.
pub async fn handle_session(
    socket: WebSocket,
    room_id: String,
    registry: Arc<RoomRegistry>,
    state_store: Arc<RoomStateStore>,
    mut quit_rx: broadcast::Receiver<()>,
) {
    // Generate a random id for the session, since participants are anonymous
    let session_id = nanoid!();
    let (mut socket_tx, mut socket_rx) = socket.split();

    let (mut relay_rx, handle) = registry.join(&room_id, &session_id).await;
    let session = WatchSession::new(handle, registry, state_store);
    info!(%room_id, %session_id, "participant joined");

    // Welcome the participant with the room's current playback snapshot,
    // before any relayed event can reach them
    let snapshot = session.sync_state().await;
    if write_event(&mut socket_tx, &snapshot).await.is_err() {
        debug!(%room_id, %session_id, "participant went away before the state snapshot");
        session.leave().await;
        return;
    }

    loop {
        tokio::select! {
            message = socket_rx.next() => match message {
                // The peer closed the stream or the transport failed; both
                // are ordinary session endings, not errors
                None | Some(Err(_)) | Some(Ok(Message::Close(_))) => break,
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<PlayerCommand>(text.as_str()) {
                        Ok(command) => session.apply(command).await,
                        // A recognized tag with a broken payload, or no JSON
                        // at all: the whole event is a no-op and the session
                        // lives on
                        Err(error) => {
                            debug!(%room_id, %session_id, %error, "ignoring malformed command");
                        }
                    }
                }
                // Binary, ping and pong frames are not part of the protocol
                Some(Ok(_)) => {}
            },
            // Events relayed from the other members of the room
            event = relay_rx.recv() => match event {
                Some(event) => {
                    if write_event(&mut socket_tx, &event).await.is_err() {
                        break;
                    }
                }
                // The registry dropped our sender, nothing more will arrive
                None => break,
            },
            // If the server is shutting down, just close the socket; the
            // leave below still runs so the registry winds down cleanly
            Ok(_) = quit_rx.recv() => {
                debug!(%room_id, %session_id, "closing session for server shutdown");
                break;
            }
        }
    }

    session.leave().await;
    info!(%room_id, %session_id, "participant left");
}

async fn write_event(
    socket_tx: &mut SplitSink<WebSocket, Message>,
    event: &PlayerEvent,
) -> anyhow::Result<()> {
    let serialized = serde_json::to_string(event).context("failed to serialize event")?;

    socket_tx
        .send(Message::Text(serialized.into()))
        .await
        .context("could not write the event to the socket")?;

    Ok(())
}
