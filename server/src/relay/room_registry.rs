use std::{collections::HashMap, sync::Arc};

use protocol::event::PlayerEvent;
use tokio::sync::{mpsc::UnboundedReceiver, Mutex};
use tracing::debug;

use super::room::{RoomSessionHandle, WatchRoom};

/// [RoomRegistry] maps room ids to their live membership and applies the
/// fan-out policy for every relayed event.
///
/// A membership entry exists only while the room has at least one member and
/// is dropped the moment the last one leaves. Playback state lives elsewhere
/// ([crate::state_store::RoomStateStore]) and outlives the membership entry.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<String, Arc<Mutex<WatchRoom>>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the session under the given room id, creating the membership
    /// entry if this is the first member.
    ///
    /// # Returns
    ///
    /// - The receiver on which events relayed to this member arrive
    /// - A [RoomSessionHandle] to surrender on leave
    pub async fn join(
        &self,
        room_id: &str,
        session_id: &str,
    ) -> (UnboundedReceiver<PlayerEvent>, RoomSessionHandle) {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .entry(room_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(WatchRoom::new(room_id))))
            .clone();

        // Registered before the map lock is released, so a concurrent leave
        // cannot drop an entry this member is about to occupy.
        let mut room = room.lock().await;
        room.join(session_id)
    }

    /// Removes the member behind the handle; deletes the room's membership
    /// entry entirely once it becomes empty.
    pub async fn leave(&self, handle: RoomSessionHandle) {
        let mut rooms = self.rooms.lock().await;
        let room_id = handle.room_id().to_string();

        let Some(room) = rooms.get(&room_id).cloned() else {
            return;
        };

        let mut guard = room.lock().await;
        guard.leave(handle);

        if guard.is_empty() {
            drop(guard);
            rooms.remove(&room_id);
        }
    }

    /// Delivers the event to every current member of the room except
    /// `exclude`. A room with no members is a silent no-op.
    ///
    /// Membership is snapshotted under the room lock and the sends run after
    /// it is released; a member joining mid-flight may miss this particular
    /// event, which is an accepted race. A send that fails because the
    /// receiving session already went away is skipped, it never affects the
    /// remaining recipients or the caller.
    pub async fn broadcast(&self, room_id: &str, event: PlayerEvent, exclude: Option<&str>) {
        let room = {
            let rooms = self.rooms.lock().await;
            match rooms.get(room_id) {
                Some(room) => room.clone(),
                None => return,
            }
        };

        let recipients = {
            let room = room.lock().await;
            room.recipients(exclude)
        };

        for (session_id, sender) in recipients {
            if sender.send(event.clone()).is_err() {
                debug!(room_id, %session_id, "dropping event for a session that already went away");
            }
        }
    }

    /// Whether the room currently has a membership entry.
    pub async fn has_room(&self, room_id: &str) -> bool {
        self.rooms.lock().await.contains_key(room_id)
    }

    /// Session ids of the room's current members in join order, empty when
    /// the room has no entry.
    pub async fn session_ids(&self, room_id: &str) -> Vec<String> {
        let room = {
            let rooms = self.rooms.lock().await;
            rooms.get(room_id).cloned()
        };

        match room {
            Some(room) => room.lock().await.session_ids(),
            None => Vec::new(),
        }
    }
}
