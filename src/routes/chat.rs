use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    locale,
    message::{ChatReply, ChatRequest, Language},
    services::deepseek::Deadline,
    state::SharedState,
};

/// Every `OPTIONS` on the chat route, browser preflights included.
pub async fn preflight_handler() -> Response {
    let mut response = StatusCode::OK.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    response
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatReply>, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("chat", %request_id);
    relay(state, body).instrument(span).await
}

async fn relay(state: SharedState, body: Bytes) -> Result<Json<ChatReply>, AppError> {
    // An absent body reads as `{}`; whitespace alone is malformed JSON.
    let raw: &[u8] = if body.is_empty() {
        b"{}"
    } else {
        &body
    };

    let payload = match serde_json::from_slice::<serde_json::Value>(raw) {
        Ok(value) if !value.is_object() => {
            return Err(AppError::BadRequest("Message is required".to_string()));
        }
        Ok(value) => serde_json::from_value::<ChatRequest>(value),
        Err(e) => Err(e),
    };

    let request = match payload {
        Ok(request) => request,
        Err(e) => {
            let language = Language::sniff(raw);
            warn!(error = %e, "unreadable chat request");
            return Ok(Json(ChatReply::failure(locale::unavailable(language), language)));
        }
    };

    let language = request.language();
    let Some(message) = request.message() else {
        return Err(AppError::BadRequest("Message is required".to_string()));
    };
    info!(language = language.code(), chars = message.chars().count(), "chat request received");

    let Some(api_key) = state.upstream.api_key.as_deref() else {
        warn!("DEEPSEEK_API_KEY is not set");
        return Ok(Json(ChatReply::failure(locale::config_error(language), language)));
    };

    let system_prompt = request
        .system_prompt()
        .unwrap_or_else(|| locale::default_system_prompt(language));

    let deadline = Deadline::after(state.upstream.timeout);
    let outcome = state
        .client
        .complete(api_key, system_prompt, message, deadline.token())
        .await;
    drop(deadline);

    match outcome {
        Ok(content) => {
            let reply = content.unwrap_or_else(|| {
                warn!("upstream returned no content");
                locale::cannot_answer(language).to_string()
            });
            Ok(Json(ChatReply::answer(reply, language)))
        }
        Err(e) => {
            error!(error = %e, kind = ?e.kind(), "upstream call failed");
            Ok(Json(ChatReply::failure(locale::unavailable(language), language)))
        }
    }
}
