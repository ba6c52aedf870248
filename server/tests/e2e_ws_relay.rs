use std::net::SocketAddr;

use futures::{SinkExt, StreamExt};
use protocol::{
    command::{ChangeUrlCommand, PlayerCommand, SeekCommand},
    event::{ChangeUrlEvent, PlayerEvent, SeekEvent, SyncStateEvent},
};
use server::{
    config::ServerConfig,
    http::{self, SearchResult},
};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::broadcast,
};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Boots the whole application on an ephemeral port and returns its address.
/// The search upstream points at a closed port, so `/search` exercises the
/// degraded path.
async fn spawn_server() -> SocketAddr {
    let config = ServerConfig {
        listen: "127.0.0.1:0".parse().unwrap(),
        search_upstream: "http://127.0.0.1:9".to_string(),
    };
    let (quit_tx, _) = broadcast::channel::<()>(1);
    let app = http::router(http::AppState::new(&config, quit_tx));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind to an ephemeral port");
    let addr = listener.local_addr().expect("listener has no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("server stopped unexpectedly");
    });

    addr
}

async fn connect(addr: SocketAddr, room_id: &str) -> WsClient {
    let (socket, _) = connect_async(format!("ws://{addr}/ws/{room_id}"))
        .await
        .expect("could not connect to the server");

    socket
}

async fn recv_event(socket: &mut WsClient) -> PlayerEvent {
    loop {
        let message = socket
            .next()
            .await
            .expect("server closed the connection")
            .expect("transport error while receiving");

        if let Message::Text(text) = message {
            return serde_json::from_str(&text).expect("could not parse event");
        }
    }
}

async fn send_command(socket: &mut WsClient, command: &PlayerCommand) {
    let serialized = serde_json::to_string(command).expect("could not serialize command");

    socket
        .send(Message::Text(serialized))
        .await
        .expect("could not send command");
}

#[tokio::test]
async fn relays_playback_actions_between_participants() {
    let addr = spawn_server().await;

    // The first joiner of a never-seen room receives the default snapshot
    let mut a = connect(addr, "r1").await;
    assert_eq!(
        recv_event(&mut a).await,
        PlayerEvent::SyncState(SyncStateEvent {
            url: String::new(),
            is_playing: false,
            timestamp: 0.0,
        })
    );

    // ... and so does the second, nothing has happened yet
    let mut b = connect(addr, "r1").await;
    assert_eq!(
        recv_event(&mut b).await,
        PlayerEvent::SyncState(SyncStateEvent {
            url: String::new(),
            is_playing: false,
            timestamp: 0.0,
        })
    );

    // A loads new content; only B gets the relayed event
    send_command(
        &mut a,
        &PlayerCommand::ChangeUrl(ChangeUrlCommand {
            url: "abc".to_string(),
        }),
    )
    .await;
    assert_eq!(
        recv_event(&mut b).await,
        PlayerEvent::ChangeUrl(ChangeUrlEvent {
            url: "abc".to_string()
        })
    );

    // B seeks; the seek is the first and only event A ever receives, which
    // also proves the CHANGE_URL above never echoed back to its originator
    send_command(&mut b, &PlayerCommand::Seek(SeekCommand { time: 42.0 })).await;
    assert_eq!(
        recv_event(&mut a).await,
        PlayerEvent::Seek(SeekEvent { time: 42.0 })
    );

    // A leaves; the room state survives membership changes and a late joiner
    // is greeted with everything that happened so far
    a.close(None).await.expect("could not close the socket");

    let mut c = connect(addr, "r1").await;
    assert_eq!(
        recv_event(&mut c).await,
        PlayerEvent::SyncState(SyncStateEvent {
            url: "abc".to_string(),
            is_playing: true,
            timestamp: 42.0,
        })
    );
}

#[tokio::test]
async fn malformed_and_unknown_commands_do_not_end_the_session() {
    let addr = spawn_server().await;

    let mut a = connect(addr, "quirks").await;
    recv_event(&mut a).await;
    let mut b = connect(addr, "quirks").await;
    recv_event(&mut b).await;

    // A seek without its time, an unrecognized tag, and something that is
    // not JSON at all; none of these may produce a broadcast or kill A
    for raw in [
        r#"{"type":"SEEK"}"#,
        r#"{"type":"NUKE_ROOM","payload":{"x":1}}"#,
        "not json",
    ] {
        a.send(Message::Text(raw.to_string()))
            .await
            .expect("could not send raw frame");
    }

    // The session still relays properly afterwards, and the first thing B
    // sees is the PLAY, so the garbage above produced nothing
    send_command(&mut a, &PlayerCommand::Play).await;
    assert_eq!(recv_event(&mut b).await, PlayerEvent::Play);
}

#[tokio::test]
async fn rooms_are_isolated_from_each_other() {
    let addr = spawn_server().await;

    let mut a = connect(addr, "room-a").await;
    recv_event(&mut a).await;
    let mut a2 = connect(addr, "room-a").await;
    recv_event(&mut a2).await;
    let mut b = connect(addr, "room-b").await;
    recv_event(&mut b).await;
    let mut b2 = connect(addr, "room-b").await;
    recv_event(&mut b2).await;

    send_command(&mut b, &PlayerCommand::Play).await;
    assert_eq!(recv_event(&mut b2).await, PlayerEvent::Play);

    // room-a never saw room-b's PLAY: the first event a2 ever receives is
    // the PAUSE from its own room
    send_command(&mut a, &PlayerCommand::Pause).await;
    assert_eq!(recv_event(&mut a2).await, PlayerEvent::Pause);

    // ... and room-b is equally unaffected in the other direction
    send_command(&mut b2, &PlayerCommand::Seek(SeekCommand { time: 7.0 })).await;
    assert_eq!(
        recv_event(&mut b).await,
        PlayerEvent::Seek(SeekEvent { time: 7.0 })
    );
}

#[tokio::test]
async fn search_degrades_to_an_empty_list_when_the_upstream_is_down() {
    let addr = spawn_server().await;

    let response = reqwest::get(format!("http://{addr}/search?q=rust"))
        .await
        .expect("search request failed");

    assert!(response.status().is_success());
    let results: Vec<SearchResult> = response.json().await.expect("could not parse results");
    assert!(results.is_empty());
}
