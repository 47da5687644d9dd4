//! reqwest-based media service client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use vidtube_common::MediaConfig;
use vidtube_core::entities::{MediaAsset, MediaUpload};
use vidtube_core::error::DomainError;
use vidtube_core::traits::{MediaStore, RepoResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    url: &'a str,
}

fn unavailable(e: impl std::fmt::Display) -> DomainError {
    DomainError::MediaUnavailable(e.to_string())
}

/// Media store talking to the external media service.
///
/// - `POST {base}/upload` (multipart field `file`) returns `{"url": "..."}`
/// - `DELETE {base}/assets` with `{"url": "..."}` removes an asset
#[derive(Clone)]
pub struct HttpMediaStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpMediaStore {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> RepoResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(unavailable)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &MediaConfig) -> RepoResult<Self> {
        Self::new(config.service_url.clone(), config.api_key.clone())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.len()))]
    async fn upload(&self, upload: &MediaUpload) -> RepoResult<MediaAsset> {
        if upload.is_empty() {
            return Err(DomainError::ValidationError(format!(
                "{} is empty",
                upload.file_name
            )));
        }

        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        if let Some(content_type) = &upload.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|_| DomainError::ValidationError(format!("invalid content type: {content_type}")))?;
        }

        let response = self
            .authorized(self.client.post(format!("{}/upload", self.base_url)))
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Media service rejected upload");
            return Err(unavailable(format!("upload failed with status {status}")));
        }

        let body: UploadResponse = response.json().await.map_err(unavailable)?;
        debug!(url = %body.url, "Media uploaded");

        Ok(MediaAsset::new(body.url))
    }

    #[instrument(skip(self))]
    async fn delete(&self, url: &str) -> RepoResult<()> {
        let response = self
            .authorized(self.client.delete(format!("{}/assets", self.base_url)))
            .json(&DeleteRequest { url })
            .send()
            .await
            .map_err(unavailable)?;

        match response.status() {
            // Already gone
            status if status.is_success() || status == StatusCode::NOT_FOUND => Ok(()),
            status => Err(unavailable(format!("delete failed with status {status}"))),
        }
    }
}

impl std::fmt::Debug for HttpMediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMediaStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
