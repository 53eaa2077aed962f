//! `reqwest`-backed [`Fetcher`] used by the binary.

use crate::config::EngineConfig;
use crate::error::{LookupError, Result};
use crate::fetch::{FetchResponse, Fetcher};
use async_trait::async_trait;
use reqwest::{Client, Response};

/// Plain HTTP transport. No retries; pages are returned as served, without
/// running their scripts.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(config: &EngineConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        self.client.get(url).send().await.map_err(|e| transport(url, &e))
    }
}

fn transport(url: &str, error: &reqwest::Error) -> LookupError {
    LookupError::Transport(format!("{}: {}", url, error))
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<FetchResponse<Vec<u8>>> {
        let response = self.get(url).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| transport(url, &e))?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(FetchResponse::new(status, body.to_vec()))
    }

    async fn fetch_text(&self, url: &str) -> Result<FetchResponse<String>> {
        let response = self.get(url).await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| transport(url, &e))?;
        Ok(FetchResponse::new(status, body))
    }

    async fn fetch_json(&self, url: &str) -> Result<FetchResponse<serde_json::Value>> {
        let FetchResponse { status, body } = self.fetch_text(url).await?;
        let value = serde_json::from_str(&body).unwrap_or_else(|e| {
            tracing::debug!("Response from {} is not JSON: {}", url, e);
            serde_json::Value::Null
        });
        Ok(FetchResponse::new(status, value))
    }
}
