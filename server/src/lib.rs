/// Process configuration resolved from CLI flags and environment variables
pub mod config;
/// HTTP surface; the per-room WebSocket endpoint and the video search proxy
pub mod http;
/// Session registry and broadcast relay for the rooms of this process
pub mod relay;
/// Per-connection session loop bridging a WebSocket to the relay
pub mod session;
/// Playback state kept per room for the lifetime of the process
pub mod state_store;
