mod member_registry;
mod session_handle;
mod watch_room;

pub use self::session_handle::RoomSessionHandle;
pub use self::watch_room::WatchRoom;
