use reqwest::{Client, StatusCode, header};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::client::session::Session;
use crate::client::view::ChatView;
use crate::error::ErrorKind;
use crate::locale;
use crate::message::{ChatReply, Language, OutgoingMessage, now_iso8601};
use crate::services::mock_responder::{FallbackError, FallbackResponder, MockResponder};

const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to fetch: {0}")]
    Network(#[source] reqwest::Error),

    #[error("endpoint returned 404 without a reply")]
    NotFound,

    #[error("server returned a non-JSON response: {}", .0.as_u16())]
    NonJson(StatusCode),

    #[error("unreadable reply: {0}")]
    Decode(#[source] reqwest::Error),

    /// The relay answered with `error: true`; holds its localized text.
    #[error("{0}")]
    Service(String),

    #[error("No response from AI")]
    EmptyReply,

    #[error(transparent)]
    Fallback(#[from] FallbackError),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Network(_) => ErrorKind::Network,
            DispatchError::NotFound => ErrorKind::NotFound,
            DispatchError::NonJson(status) if *status == StatusCode::NOT_FOUND => {
                ErrorKind::NotFound
            }
            _ => ErrorKind::Upstream,
        }
    }
}

/// Text shown when neither the relay nor the fallback produced a reply.
pub fn failure_message(err: &DispatchError, language: Language) -> String {
    match err.kind() {
        ErrorKind::Network => locale::network_down(language).to_string(),
        ErrorKind::NotFound => locale::endpoint_not_found(language).to_string(),
        ErrorKind::Timeout | ErrorKind::Upstream => {
            locale::request_failed(language, &err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Relay,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Another dispatch on the session was still running; nothing happened.
    Busy,
    EmptyInput,
    Replied { text: String, source: ReplySource },
    Failed { text: String },
}

pub struct Dispatcher<F = MockResponder> {
    http: Client,
    endpoint: String,
    fallback: F,
}

impl Dispatcher<MockResponder> {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_fallback(endpoint, MockResponder::default())
    }
}

impl<F: FallbackResponder> Dispatcher<F> {
    pub fn with_fallback(endpoint: impl Into<String>, fallback: F) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Client::builder().build()?,
            endpoint: endpoint.into(),
            fallback,
        })
    }

    /// Sends one user input through the relay and renders the result.
    pub async fn send<V>(&self, session: &Session, input: &str, view: &V) -> Outcome
    where
        V: ChatView + ?Sized,
    {
        if session.is_in_flight() {
            debug!("dispatch already in flight");
            return Outcome::Busy;
        }

        let display = session.display_language();
        let message = input.trim();
        if message.is_empty() {
            view.alert(locale::empty_input(display));
            return Outcome::EmptyInput;
        }

        let Some(guard) = session.try_begin() else {
            debug!("lost the race for the session");
            return Outcome::Busy;
        };

        let language = Language::detect(message);
        let outcome = match self.request_reply(message, language, display).await {
            Ok((text, source)) => {
                view.show_response(&text, false);
                Outcome::Replied { text, source }
            }
            Err(err) => {
                warn!(error = %err, kind = ?err.kind(), "relay request failed, trying fallback");
                match self.fallback.fallback_reply(message, language).await {
                    Ok(text) => {
                        view.show_response(&text, false);
                        Outcome::Replied { text, source: ReplySource::Fallback }
                    }
                    Err(fallback_err) => {
                        error!(error = %fallback_err, "fallback failed too");
                        let text = failure_message(&err, display);
                        view.show_response(&text, true);
                        Outcome::Failed { text }
                    }
                }
            }
        };

        drop(guard);
        view.reset_ui_state();
        outcome
    }

    async fn request_reply(
        &self,
        message: &str,
        language: Language,
        display: Language,
    ) -> Result<(String, ReplySource), DispatchError> {
        let payload = OutgoingMessage {
            message,
            language,
            timestamp: now_iso8601(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(DispatchError::Network)?;

        let status = response.status();
        debug!(status = status.as_u16(), "relay responded");

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        if !is_json {
            let text = response.text().await.unwrap_or_default();
            let preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
            error!(status = status.as_u16(), body = %preview, "non-JSON response from relay");

            if status == StatusCode::NOT_FOUND {
                info!("relay endpoint missing, using mock reply");
                let reply = self.fallback.fallback_reply(message, language).await?;
                return Ok((reply, ReplySource::Fallback));
            }
            return Err(DispatchError::NonJson(status));
        }

        let data: ChatReply = response.json().await.map_err(DispatchError::Decode)?;

        if data.error {
            let text = if data.reply.is_empty() {
                locale::service_error(display).to_string()
            } else {
                data.reply
            };
            return Err(DispatchError::Service(text));
        }

        if !data.reply.is_empty() {
            return Ok((data.reply, ReplySource::Relay));
        }

        if status == StatusCode::NOT_FOUND {
            Err(DispatchError::NotFound)
        } else {
            Err(DispatchError::EmptyReply)
        }
    }
}
