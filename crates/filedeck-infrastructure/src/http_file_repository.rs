//! REST implementation of [`FileRepository`].
//!
//! Talks to a json-server style collection:
//! `GET {base}/files`, `POST {base}/files`, `DELETE {base}/files/:id`.

use std::time::Duration;

use async_trait::async_trait;
use filedeck_core::config::AppConfig;
use filedeck_core::error::{FileDeckError, Result};
use filedeck_core::files::{FileRecord, FileRepository, NewFileRecord};
use reqwest::{Client, Response, Url};

use crate::config_service::validate_server_url;

/// File collection reached over HTTP.
#[derive(Clone)]
pub struct HttpFileRepository {
    client: Client,
    /// `{base}/files`
    endpoint: Url,
}

impl HttpFileRepository {
    /// Creates a repository for the collection under `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = validate_server_url(base_url)?;
        let endpoint = Url::parse(&format!("{}/files", base.as_str().trim_end_matches('/')))
            .map_err(|e| FileDeckError::config(format!("invalid files endpoint: {}", e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FileDeckError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.server.json_server_url,
            Duration::from_secs(config.server.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn item_url(&self, id: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| FileDeckError::config("files endpoint cannot be a base URL"))?
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl FileRepository for HttpFileRepository {
    async fn list(&self) -> Result<Vec<FileRecord>> {
        tracing::debug!("[HttpFileRepository] GET {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        response.json().await.map_err(decode_error)
    }

    async fn create(&self, record: &NewFileRecord) -> Result<FileRecord> {
        tracing::debug!(
            "[HttpFileRepository] POST {} ({}, {} bytes)",
            self.endpoint,
            record.name,
            record.size
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        response.json().await.map_err(decode_error)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.item_url(id)?;
        tracing::debug!("[HttpFileRepository] DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(transport_error)?;

        // Body is not needed
        ensure_success(response).await.map(|_| ())
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = status.canonical_reason().unwrap_or("unexpected status");
    let message = if body.trim().is_empty() {
        reason.to_string()
    } else {
        format!("{}: {}", reason, body.trim())
    };
    Err(FileDeckError::http_status(status.as_u16(), message))
}

fn transport_error(err: reqwest::Error) -> FileDeckError {
    FileDeckError::network(format!("request failed: {}", err))
}

fn decode_error(err: reqwest::Error) -> FileDeckError {
    if err.is_decode() {
        FileDeckError::decode("JSON", err.to_string())
    } else {
        transport_error(err)
    }
}
