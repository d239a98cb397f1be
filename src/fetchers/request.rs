use crate::config::FetchConfig;
use crate::error::FetchError;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;

/// Plain HTTP(S) GET fetcher: one request, no retries, no caching
#[derive(Debug, Clone)]
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let config = FetchConfig::default();
        Self::with_timeout(&config, timeout.unwrap_or_else(|| config.timeout()))
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        Self::with_timeout(config, config.timeout())
    }

    /// Like `from_config`, with the configured timeout replaced (sub-second
    /// values are kept as given)
    pub fn with_timeout(config: &FetchConfig, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,image/*;q=0.9,*/*;q=0.8"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(HeaderValue::from_str(&config.user_agent)?)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the raw response body
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("RequestFetcher: GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("RequestFetcher: {} answered {}", url, status);
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("RequestFetcher: received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }

    /// Fetch a page and decode it as text (invalid UTF-8 is replaced)
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let body = self.fetch(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
