use protocol::event::PlayerEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{member_registry::MemberRegistry, session_handle::RoomSessionHandle};

/// [WatchRoom] holds the live membership of a single room.
/// A [RoomSessionHandle] is handed out to a participant when they join.
#[derive(Debug)]
pub struct WatchRoom {
    room_id: String,
    members: MemberRegistry,
}

impl WatchRoom {
    pub fn new(room_id: &str) -> Self {
        WatchRoom {
            room_id: room_id.to_string(),
            members: MemberRegistry::new(),
        }
    }

    /// Add a participant to the room.
    ///
    /// # Returns
    ///
    /// - The receiver on which events relayed to this member arrive
    /// - A [RoomSessionHandle] to surrender when the member leaves
    pub fn join(&mut self, session_id: &str) -> (UnboundedReceiver<PlayerEvent>, RoomSessionHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.members.insert(session_id, sender);

        (
            receiver,
            RoomSessionHandle::new(self.room_id.clone(), session_id.to_string()),
        )
    }

    /// Remove a participant from the room.
    /// Consumes the [RoomSessionHandle]; removal of an already absent member
    /// is a no-op.
    pub fn leave(&mut self, handle: RoomSessionHandle) {
        self.members.remove(handle.session_id());
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Session ids of the current members, in join order.
    pub fn session_ids(&self) -> Vec<String> {
        self.members.session_ids()
    }

    /// Membership snapshot for a fan-out, minus the excluded session.
    pub fn recipients(&self, exclude: Option<&str>) -> Vec<(String, UnboundedSender<PlayerEvent>)> {
        self.members.recipients(exclude)
    }
}
