/// [RoomSessionHandle] is the receipt a participant session gets when it
/// joins a room.
///
/// It is surrendered back to the registry on leave; consuming the handle is
/// what makes a double leave unrepresentable.
#[derive(Debug)]
pub struct RoomSessionHandle {
    /// The id of the room which is associated with this handle
    room_id: String,
    /// The session id this handle was handed out to
    session_id: String,
}

impl RoomSessionHandle {
    pub(super) fn new(room_id: String, session_id: String) -> Self {
        RoomSessionHandle {
            room_id,
            session_id,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
