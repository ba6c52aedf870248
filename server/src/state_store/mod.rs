use std::collections::HashMap;

use tokio::sync::Mutex;

/// The authoritative playback snapshot of a single room.
///
/// `timestamp` is a checkpoint written by seeks, not a live clock; the server
/// never advances it on its own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    /// The currently loaded content reference, empty when nothing is loaded
    pub media_url: String,
    /// The current play/pause intent of the room
    pub is_playing: bool,
    /// The last playback position communicated by a seek, in milliseconds
    pub timestamp: f64,
}

/// A partial write against a room's [PlaybackState].
/// Only the fields set to `Some` are applied, the others stay untouched.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub media_url: Option<String>,
    pub is_playing: Option<bool>,
    pub timestamp: Option<f64>,
}

/// [RoomStateStore] keeps one [PlaybackState] per room id for the lifetime of
/// the process.
///
/// Records are created lazily on first touch and never removed, even after
/// the last participant leaves; live membership is tracked separately by
/// [crate::relay::RoomRegistry] and does not bound the state's lifetime.
#[derive(Debug, Default)]
pub struct RoomStateStore {
    states: Mutex<HashMap<String, PlaybackState>>,
}

impl RoomStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the room's current state, creating the default record if the
    /// room id has never been seen. Get-or-create is a single critical
    /// section, so a half-constructed record is never observable.
    pub async fn get(&self, room_id: &str) -> PlaybackState {
        let mut states = self.states.lock().await;

        states.entry(room_id.to_string()).or_default().clone()
    }

    /// Merges the given fields into the room's state, creating the default
    /// record first if absent.
    pub async fn update(&self, room_id: &str, update: StateUpdate) {
        let mut states = self.states.lock().await;
        let state = states.entry(room_id.to_string()).or_default();

        if let Some(media_url) = update.media_url {
            state.media_url = media_url;
        }
        if let Some(is_playing) = update.is_playing {
            state.is_playing = is_playing;
        }
        if let Some(timestamp) = update.timestamp {
            state.timestamp = timestamp;
        }
    }
}
