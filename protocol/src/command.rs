use serde::{Deserialize, Serialize};

/// Payload of the command for loading new content into the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeUrlCommand {
    // The content reference to load in every player of the room.
    pub url: String,
}

/// Payload of the command for jumping to a playback position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekCommand {
    // The playback position in milliseconds.
    pub time: f64,
}

/// A player command which can be sent to the server by a single participant session.
/// All commands are processed in the context of the room the session is connected to.
///
/// Tags not listed here decode to [PlayerCommand::Unknown], which the server
/// drops without an error, so newer clients do not break older servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerCommand {
    Play,
    Pause,
    ChangeUrl(ChangeUrlCommand),
    Seek(SeekCommand),
    #[serde(other)]
    Unknown,
}
