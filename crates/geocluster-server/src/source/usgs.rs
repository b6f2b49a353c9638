//! USGS FDSN event feed client with retry

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

use super::{parse_geojson, PointSource};
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::types::QuakePoint;

/// Queries the USGS event service for a date range and magnitude floor
pub struct UsgsSource {
    /// HTTP client
    client: Client,
    /// Configuration
    config: SourceConfig,
    /// Base delay between retries, doubled per attempt
    backoff: Duration,
}

impl UsgsSource {
    /// Create a new feed client
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("geocluster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
            backoff: Duration::from_secs(1),
        })
    }

    /// Override the base retry delay
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Query string parameters sent to the feed
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", "geojson".to_string()),
            ("starttime", self.config.start_time.clone()),
            ("endtime", self.config.end_time.clone()),
            ("minmagnitude", self.config.min_magnitude.to_string()),
        ]
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if attempt < self.config.max_retries {
                        let delay = self.backoff * 2u32.pow(attempt);
                        tracing::warn!(
                            "Feed request failed (attempt {}/{}): {}; retrying in {:?}",
                            attempt + 1,
                            self.config.max_retries + 1,
                            e,
                            delay
                        );
                        sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::data_source("Unknown feed error")))
    }

    async fn fetch_body(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.query())
            .send()
            .await
            .map_err(|e| Error::data_source(format!("Feed request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::data_source(format!(
                "Feed returned HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::data_source(format!("Failed to read feed body: {}", e)))
    }
}

#[async_trait]
impl PointSource for UsgsSource {
    async fn fetch(&self) -> Result<Vec<QuakePoint>> {
        tracing::info!(
            "Fetching events from {} ({} to {}, M{}+)",
            self.config.base_url,
            self.config.start_time,
            self.config.end_time,
            self.config.min_magnitude
        );

        let body = self.retry_request(|| self.fetch_body()).await?;
        let points = parse_geojson(&body)?;

        tracing::info!("Fetched {} events", points.len());
        Ok(points)
    }

    fn name(&self) -> &str {
        "usgs"
    }
}
