use serde::{Deserialize, Serialize};

/// New content has been loaded by another participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeUrlEvent {
    // The content reference the room switched to.
    pub url: String,
}

/// Another participant jumped to a playback position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekEvent {
    // The playback position in milliseconds.
    pub time: f64,
}

/// Snapshot of the room's playback state, sent to a participant right after
/// they join and never broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStateEvent {
    pub url: String,
    pub is_playing: bool,
    pub timestamp: f64,
}

/// Events that can be sent to a participant.
/// The relayed variants mirror the commands of the originating participant;
/// the receipient is every other member of the same room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerEvent {
    Play,
    Pause,
    ChangeUrl(ChangeUrlEvent),
    Seek(SeekEvent),
    SyncState(SyncStateEvent),
}
