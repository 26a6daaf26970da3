use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::UpstreamConfig;
use crate::error::ErrorKind;

const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it has any text.
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream call exceeded its deadline")]
    Timeout,

    #[error("upstream unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("API responded with status: {0}")]
    Status(StatusCode),

    #[error("undecodable upstream response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl UpstreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UpstreamError::Timeout => ErrorKind::Timeout,
            UpstreamError::Network(_) => ErrorKind::Network,
            UpstreamError::Status(StatusCode::NOT_FOUND) => ErrorKind::NotFound,
            UpstreamError::Status(_) | UpstreamError::Decode(_) => ErrorKind::Upstream,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Decode(e)
        } else {
            UpstreamError::Network(e)
        }
    }
}

/// A cancellation token that fires on its own once `timeout` elapses.
///
/// Dropping the deadline disarms the timer; the token stays usable.
pub struct Deadline {
    token: CancellationToken,
    timer: JoinHandle<()>,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            trigger.cancel();
        });
        Self { token, timer }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    http: Client,
    api_url: String,
    model: String,
}

impl DeepSeekClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }

    /// Sends one system + user exchange and returns the first choice's text.
    ///
    /// `Ok(None)` means the upstream answered but produced no content.
    /// Cancelling `cancel` aborts the in-flight call with [`UpstreamError::Timeout`].
    pub async fn complete(
        &self,
        api_key: &str,
        system: &str,
        user: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, UpstreamError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
        };

        let call = async {
            let response = self
                .http
                .post(&self.api_url)
                .bearer_auth(api_key)
                .header(header::ACCEPT, "application/json")
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(UpstreamError::Status(status));
            }

            let completion: ChatCompletionResponse = response.json().await?;
            Ok::<_, UpstreamError>(completion.into_content())
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(UpstreamError::Timeout),
            result = call => result,
        }
    }
}
