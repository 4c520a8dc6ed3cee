//! recall-proxy entry point.
//!
//! Stands up the thin reverse proxy with the memory interception layer
//! attached. Listens on `RECALL_LISTEN_ADDR` (default `127.0.0.1:8317`),
//! forwards to `RECALL_UPSTREAM_URL` (default `http://localhost:8080`),
//! and reads the memory configuration from the `LETTA_*` environment.

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use recall_api::attach_from_env;
use recall_api::proxy::{UpstreamClient, proxy_router};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8317";
const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let listen_addr =
        std::env::var("RECALL_LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
    let upstream_url =
        std::env::var("RECALL_UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());

    let upstream = Arc::new(UpstreamClient::new(upstream_url.clone()));
    let router = attach_from_env(proxy_router(upstream)).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!(listen = %listen_addr, upstream = %upstream_url, "recall-proxy listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("recall-proxy stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
