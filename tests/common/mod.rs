#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chat_relay::config::UpstreamConfig;
use chat_relay::state::{AppState, SharedState};
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral local port for the rest of the test.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A local address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn state(api_key: Option<&str>, api_url: String, timeout: Duration) -> SharedState {
    let upstream = UpstreamConfig {
        api_key: api_key.map(str::to_string),
        api_url,
        timeout,
        ..Default::default()
    };
    Arc::new(AppState::new(upstream).unwrap())
}

pub fn unconfigured_state() -> SharedState {
    Arc::new(AppState::new(UpstreamConfig::default()).unwrap())
}
