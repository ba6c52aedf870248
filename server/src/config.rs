use std::net::SocketAddr;

use clap::Parser;

/// Process configuration, resolved from CLI flags with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "sync-relay", about = "Playback synchronization relay for shared viewing rooms")]
pub struct ServerConfig {
    /// Address the HTTP/WebSocket listener binds to.
    #[arg(long, env = "SYNC_RELAY_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Base URL of the Invidious-compatible video index backing `/search`.
    #[arg(long, env = "SYNC_RELAY_SEARCH_UPSTREAM", default_value = "https://yewtu.be")]
    pub search_upstream: String,
}
