use crate::config::FetchConfig;
use crate::error::ImportError;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Acquires page content over HTTP for the host adapters.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// GETs `url` and returns the body; non-success statuses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
