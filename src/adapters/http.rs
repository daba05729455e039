use crate::core::DataSource;
use crate::utils::error::{CraftError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Fetches JSON documents relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    base_url: Url,
    client: Client,
}

impl HttpDataSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CraftError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| CraftError::ValidationError {
                message: format!("Cannot resolve '{}' against {}: {}", path, self.base_url, e),
            })
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url_for(path)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CraftError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
