mod config;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::Notify;
use tracing::{info, warn};

use chatboard_api::{AppStateInner, build_router};
use chatboard_store::MessageStore;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chatboard=debug,chatboard_api=debug,chatboard_store=debug,tower_http=debug".into()
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // One store for the whole process
    let state = AppStateInner::new(MessageStore::seeded(config.id_scheme));
    let app = build_router(state, &config.base_path);

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(
        "Chatboard listening on {} (base path '{}')",
        config.http_addr, config.base_path
    );

    serve(listener, app, config.shutdown_grace).await
}

/// Serve until a shutdown signal, then drain in-flight requests for at most
/// `grace` before giving up on them.
async fn serve(listener: tokio::net::TcpListener, app: Router, grace: Duration) -> anyhow::Result<()> {
    let shutdown = Arc::new(Notify::new());
    let trigger = shutdown.clone();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { trigger.notified().await })
            .await
    });

    tokio::select! {
        result = &mut server => {
            // Server stopped on its own, before any signal.
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    shutdown.notify_one();
    match tokio::time::timeout(grace, server).await {
        Ok(result) => {
            result??;
            info!("Server stopped gracefully");
        }
        Err(_) => {
            warn!("Requests still in flight after {:?}, forcing shutdown", grace);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
