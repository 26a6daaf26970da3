// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use chat::{chat_handler, method_not_allowed, preflight_handler};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Path the original serverless deployment exposed the handler on.
pub const LEGACY_CHAT_PATH: &str = "/.netlify/functions/deepseek-assistant";

pub fn create_router() -> Router<SharedState> {
    let chat_route = post(chat_handler)
        .options(preflight_handler)
        .fallback(method_not_allowed);

    Router::new()
        .route("/chat", chat_route.clone())
        .route(LEGACY_CHAT_PATH, chat_route)
        .route("/health", get(|| async { "OK" }))
        .layer(allow_any_origin())
        .layer(TraceLayer::new_for_http())
}

/// Stamps `Access-Control-Allow-Origin: *` on every response. `OPTIONS` is
/// answered by the chat route itself, not by a CORS middleware.
pub fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    )
}
