use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::{
    Body, Client, StatusCode,
    header::{AUTHORIZATION, CONTENT_LENGTH},
};
use thiserror::Error;
use tokio::fs::File;
use tracing::{debug, warn};
use url::Url;

use crate::rest_types::UploadTarget;

const UPLOAD_TARGET_ROUTE: &str = "resources/upload";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to construct upload target URL")]
    Endpoint(#[from] url::ParseError),
    #[error("Upload target request failed")]
    Transport(#[source] reqwest::Error),
    #[error("Unexpected status from upload target request: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Malformed upload target response")]
    MalformedResponse(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to open source file {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid upload URL {url:?}")]
    RequestBuild {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Upload request failed")]
    Transport(#[source] reqwest::Error),
    #[error("Upload rejected: {status}, body: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

/// Talks to the Yandex Disk REST API. The inner HTTP client is built once
/// and shared by both upload steps, so the timeout applies to each request.
pub struct YandexDiskClient {
    client: Client,
    api_base_url: Url,
    auth_token: String,
}

impl YandexDiskClient {
    pub fn new(
        api_base_url: Url,
        auth_token: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base_url,
            auth_token,
        })
    }

    /// Asks the service where `disk_path` may be uploaded and returns the
    /// target's `href`.
    pub async fn resolve_upload_url(&self, disk_path: &str) -> Result<String, ResolveError> {
        let url = self.api_base_url.join(UPLOAD_TARGET_ROUTE)?;

        let response = self
            .client
            .get(url)
            .query(&[("path", disk_path)])
            .header(AUTHORIZATION, format!("OAuth {}", self.auth_token))
            .send()
            .await
            .map_err(ResolveError::Transport)?;

        if response.status() != StatusCode::OK {
            return Err(ResolveError::UnexpectedStatus(response.status()));
        }

        let body = response.bytes().await.map_err(ResolveError::Transport)?;
        let target: UploadTarget =
            serde_json::from_slice(&body).map_err(ResolveError::MalformedResponse)?;

        debug!(
            operation_id = %target.operation_id,
            method = %target.method,
            templated = target.templated,
            "upload target issued"
        );
        if !target.method.is_empty() && !target.method.eq_ignore_ascii_case("PUT") {
            warn!(method = %target.method, "upload target expects a method other than PUT");
        }

        Ok(target.href)
    }

    /// Streams the file at `file_path` to `upload_url` with a single PUT.
    /// Only `201 Created` counts as success.
    pub async fn upload_file(
        &self,
        upload_url: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<(), UploadError> {
        let file_path = file_path.as_ref();
        let open_error = |source| UploadError::FileOpen {
            path: file_path.to_path_buf(),
            source,
        };

        let file = File::open(file_path).await.map_err(open_error)?;
        let metadata = file.metadata().await.map_err(open_error)?;
        if !metadata.is_file() {
            return Err(open_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let file_size = metadata.len();

        let url = Url::parse(upload_url).map_err(|source| UploadError::RequestBuild {
            url: upload_url.to_string(),
            source,
        })?;

        let response = self
            .client
            .put(url)
            .header(CONTENT_LENGTH, file_size)
            .body(Body::from(file))
            .send()
            .await
            .map_err(UploadError::Transport)?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(UploadError::UnexpectedStatus {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}
