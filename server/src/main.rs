use anyhow::Context;
use clap::Parser;
use server::{config::ServerConfig, http};
use tokio::{
    net::TcpListener,
    signal::unix::{signal, SignalKind},
    sync::broadcast,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let (quit_tx, _) = broadcast::channel::<()>(1);

    let state = http::AppState::new(&config, quit_tx.clone());
    let app = http::router(state);

    let listener = TcpListener::bind(config.listen)
        .await
        .context("could not bind to the listen address")?;
    info!(addr = %config.listen, "listening for participants");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(quit_tx))
        .await
        .context("server failed")?;

    info!("server shut down");
    Ok(())
}

/// Resolves once SIGINT arrives, after telling every live session to wind
/// down so the graceful shutdown can drain them.
async fn shutdown_signal(quit_tx: broadcast::Sender<()>) {
    let mut interrupt =
        signal(SignalKind::interrupt()).expect("failed to create interrupt signal stream");
    interrupt.recv().await;

    info!("server interrupted, gracefully shutting down");
    let _ = quit_tx.send(());
}
