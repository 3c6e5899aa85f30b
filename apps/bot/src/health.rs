//! Keep-alive HTTP endpoints for hosts that probe or idle the process.
//!
//! - `GET /` - small HTML page
//! - `GET /healthz` - liveness probe (plain `OK`)
//! - `GET /health` - JSON status with the running version

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use serde_json::json;
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{debug, info, warn};

pub const KEEP_ALIVE_EVERY: Duration = Duration::from_secs(300);
pub const KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(30);

const AWAKE_PAGE: &str = "<!DOCTYPE html><html><head><title>Stock bot!</title></head>\
<body><h1>Thanks for checking up on me. I'm awake.</h1></body></html>";

struct HealthState {
    version: String,
}

pub fn router(version: String) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(liveness_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(HealthState { version }))
}

pub async fn serve(listener: TcpListener, version: String) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "health server listening");
    }

    axum::serve(listener, router(version))
        .await
        .context("health server failed")
}

/// Binds `0.0.0.0:port` and serves in the background. Failures are logged only.
pub fn spawn(port: u16, version: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = match TcpListener::bind(addr).await {
            Ok(l) => l,
            Err(e) => {
                warn!(port, error = ?e, "health server bind failed");
                return;
            }
        };

        if let Err(e) = serve(listener, version).await {
            warn!(error = ?e, "health server stopped");
        }
    })
}

/// Pings `url` on a fixed interval so idling hosts keep the process up.
pub fn spawn_keep_alive(url: String, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = match reqwest::Client::builder()
            .timeout(KEEP_ALIVE_TIMEOUT)
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                warn!(error = ?e, "keep-alive client init failed");
                return;
            }
        };

        let mut tick = tokio::time::interval(every);
        // First tick fires immediately; the server has only just started.
        tick.tick().await;

        loop {
            tick.tick().await;

            match ping(&client, &url).await {
                Ok(status) => debug!(%status, "keep-alive ping"),
                Err(e) => warn!(error = ?e, url = %url, "keep-alive ping failed"),
            }
        }
    })
}

async fn ping(client: &reqwest::Client, url: &str) -> reqwest::Result<reqwest::StatusCode> {
    Ok(client.get(url).send().await?.status())
}

async fn index_handler() -> Html<&'static str> {
    Html(AWAKE_PAGE)
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": state.version }))
}
