// Availability client: retrieves the supplier document over HTTP
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{FinderError, Result};
use crate::supplier::AvailabilityDocument;

#[async_trait]
pub trait AvailabilityClient: Send + Sync {
    // Fetch and decode the whole availability document
    async fn fetch(&self, url: &str) -> Result<AvailabilityDocument>;
}

pub struct HttpAvailabilityClient {
    client: reqwest::Client,
}

impl HttpAvailabilityClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl AvailabilityClient for HttpAvailabilityClient {
    async fn fetch(&self, url: &str) -> Result<AvailabilityDocument> {
        let started = Instant::now();
        debug!(url, "requesting product availabilities");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(url, status = status.as_u16(), "unexpected response status");
            return Err(FinderError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let document = AvailabilityDocument::from_json(&body)
            .map_err(|e| FinderError::MalformedDocument(format!("Error parsing response: {}", e)))?;

        info!(
            url,
            records = document.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched product availabilities"
        );
        Ok(document)
    }
}
