mod room;
mod room_registry;

pub use self::room::{RoomSessionHandle, WatchRoom};
pub use self::room_registry::RoomRegistry;
