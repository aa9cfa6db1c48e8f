use async_trait::async_trait;
use serde::Serialize;

use super::WebSearch;
use crate::config::SearchConfig;
use crate::errors::{ConfigError, SearchError};

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: u32,
}

/// Google search through serper.dev.
pub struct SerperClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl SerperClient {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if !config.timeout.is_zero() {
            builder = builder.timeout(config.timeout);
        }
        let http = builder.build().map_err(ConfigError::HttpClient)?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl WebSearch for SerperClient {
    async fn search(&self, query: &str) -> Result<serde_json::Value, SearchError> {
        tracing::debug!(query, "web search");

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("X-API-KEY", self.config.api_key())
            .json(&SerperRequest {
                q: query,
                num: self.config.num_results,
            })
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(SearchError::Transport)
    }
}
