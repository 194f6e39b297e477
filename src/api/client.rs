//! HTTP client for the metadata/download service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

use crate::api::service::MediaService;
use crate::api::types::{HealthResponse, MediaRequest, VideoInfo};
use crate::config::validation::validate_base_url;
use crate::config::ServiceConfig;
use crate::error::{Error, Result};

const INFO_PATH: &str = "info";
const DOWNLOAD_PATH: &str = "download";
const HEALTH_PATH: &str = "health";

/// Client for the `/info`, `/download` and `/health` endpoints.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: Url,
}

impl ServiceClient {
    /// Build a client from the service configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut base_url = validate_base_url(&config.base_url)?;

        // Url::join replaces the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// POST `{"url": ...}` to an endpoint and require a 2xx status.
    async fn post(&self, path: &str, video_url: &str) -> Result<Response> {
        let endpoint = self.endpoint(path)?;
        tracing::debug!("POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .json(&MediaRequest { url: video_url })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Error response body: {}", body);
            return Err(Error::Service {
                endpoint: format!("/{}", path),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Fetch metadata for a video URL.
    pub async fn fetch_metadata(&self, video_url: &str) -> Result<VideoInfo> {
        let response = self.post(INFO_PATH, video_url).await?;
        let text = response.text().await?;
        tracing::debug!("Info response: {}", text);

        serde_json::from_str(&text).map_err(|e| {
            Error::MalformedResponse(format!(
                "Failed to parse video info: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Download the transcoded file for a video URL as raw bytes.
    pub async fn fetch_download(&self, video_url: &str) -> Result<Vec<u8>> {
        let response = self.post(DOWNLOAD_PATH, video_url).await?;
        let bytes = response.bytes().await?;
        tracing::debug!("Download response length: {} bytes", bytes.len());

        if bytes.is_empty() {
            return Err(Error::Download("Service returned an empty file".into()));
        }

        Ok(bytes.to_vec())
    }

    /// Probe the service health endpoint.
    pub async fn health(&self) -> Result<HealthResponse> {
        let endpoint = self.endpoint(HEALTH_PATH)?;
        tracing::debug!("GET {}", endpoint);

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Service {
                endpoint: format!("/{}", HEALTH_PATH),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MediaService for ServiceClient {
    async fn fetch_metadata(&self, url: &str) -> Result<VideoInfo> {
        ServiceClient::fetch_metadata(self, url).await
    }

    async fn fetch_download(&self, url: &str) -> Result<Vec<u8>> {
        ServiceClient::fetch_download(self, url).await
    }
}
