// src/state.rs
use std::sync::Arc;

use crate::config::UpstreamConfig;
use crate::services::deepseek::DeepSeekClient;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub upstream: UpstreamConfig,
    pub client: DeepSeekClient,
}

impl AppState {
    pub fn new(upstream: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = DeepSeekClient::new(&upstream)?;
        Ok(Self { upstream, client })
    }
}
