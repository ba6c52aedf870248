use std::sync::Arc;

use protocol::{
    command::PlayerCommand,
    event::{ChangeUrlEvent, PlayerEvent, SeekEvent, SyncStateEvent},
};
use tracing::debug;

use crate::{
    relay::{RoomRegistry, RoomSessionHandle},
    state_store::{RoomStateStore, StateUpdate},
};

/// [WatchSession] applies the playback event policy for a single participant:
/// every accepted command first updates the room's authoritative state, then
/// fans out to the other members. The originator is always excluded, since
/// their own player already applied the change locally.
pub(super) struct WatchSession {
    handle: RoomSessionHandle,
    registry: Arc<RoomRegistry>,
    state_store: Arc<RoomStateStore>,
}

impl WatchSession {
    pub fn new(
        handle: RoomSessionHandle,
        registry: Arc<RoomRegistry>,
        state_store: Arc<RoomStateStore>,
    ) -> Self {
        WatchSession {
            handle,
            registry,
            state_store,
        }
    }

    /// The snapshot a freshly joined participant receives before any relayed
    /// event, reflecting whatever the room was doing when they arrived.
    pub async fn sync_state(&self) -> PlayerEvent {
        let state = self.state_store.get(self.handle.room_id()).await;

        PlayerEvent::SyncState(SyncStateEvent {
            url: state.media_url,
            is_playing: state.is_playing,
            timestamp: state.timestamp,
        })
    }

    /// Applies a single inbound command: state mutation first, then fan-out
    /// to every other member of the room. Unknown commands are dropped
    /// without an error, a broadcast or a state change.
    pub async fn apply(&self, command: PlayerCommand) {
        let (update, event) = match command {
            PlayerCommand::Play => (
                StateUpdate {
                    is_playing: Some(true),
                    ..StateUpdate::default()
                },
                PlayerEvent::Play,
            ),
            PlayerCommand::Pause => (
                StateUpdate {
                    is_playing: Some(false),
                    ..StateUpdate::default()
                },
                PlayerEvent::Pause,
            ),
            // Loading new content restarts playback from the beginning for
            // the whole room.
            PlayerCommand::ChangeUrl(cmd) => (
                StateUpdate {
                    media_url: Some(cmd.url.clone()),
                    is_playing: Some(true),
                    timestamp: Some(0.0),
                },
                PlayerEvent::ChangeUrl(ChangeUrlEvent { url: cmd.url }),
            ),
            PlayerCommand::Seek(cmd) => (
                StateUpdate {
                    timestamp: Some(cmd.time),
                    ..StateUpdate::default()
                },
                PlayerEvent::Seek(SeekEvent { time: cmd.time }),
            ),
            PlayerCommand::Unknown => {
                debug!(room_id = self.handle.room_id(), "ignoring unrecognized command");
                return;
            }
        };

        self.state_store.update(self.handle.room_id(), update).await;
        self.registry
            .broadcast(self.handle.room_id(), event, Some(self.handle.session_id()))
            .await;
    }

    /// Deregisters the participant from the room, consuming the session.
    pub async fn leave(self) {
        self.registry.leave(self.handle).await;
    }
}
