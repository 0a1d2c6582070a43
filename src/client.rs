//! Authenticated transport plus the compress and resize operations.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use futures_util::TryStream;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};

use crate::constants::{API_ENDPOINT, AUTH_USER, UNKNOWN_FIELD};
use crate::error::{Result, TinyPngError};
use crate::types::{ApiErrorBody, CompressionResult, ResizeMethod, ResizeRequest, ResizeSpec};

/// Client for the TinyPNG compression API.
///
/// Owns a single long-lived HTTP connection pool with the Basic credential
/// attached as a default header, safe to share across concurrent in-flight
/// calls. Clones share the pool; it is released when the last clone is
/// dropped.
#[derive(Clone)]
pub struct TinyPngClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TinyPngClient {
    /// Creates a client from an API key.
    ///
    /// The key is folded into a `Basic` authorization header sent with
    /// every request. Fails if the key is empty or cannot form a valid
    /// header value.
    pub fn new(api_key: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(TinyPngError::MissingApiKey);
        }
        if api_key.chars().any(|c| c.is_ascii_control()) {
            return Err(TinyPngError::InvalidApiKey);
        }

        let mut auth = HeaderValue::from_str(&format!("Basic {}", basic_credential(api_key)))
            .map_err(|_| TinyPngError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: API_ENDPOINT.to_string(),
        })
    }

    /// Points the client at a different compression endpoint (for tests).
    #[cfg(test)]
    pub(crate) fn with_endpoint(mut self, url: String) -> Self {
        self.endpoint = url;
        self
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Compresses an image file on disk.
    pub async fn compress_file(&self, path: &Path) -> Result<CompressionResult> {
        if !path.exists() {
            return Err(TinyPngError::FileNotFound(path.to_path_buf()));
        }
        let data = tokio::fs::read(path).await?;
        self.compress_bytes(data).await
    }

    /// Compresses an in-memory byte sequence.
    pub async fn compress_bytes(&self, data: Vec<u8>) -> Result<CompressionResult> {
        self.compress_body(reqwest::Body::from(data)).await
    }

    /// Compresses bytes read from an async stream, without buffering the
    /// whole image first.
    pub async fn compress_stream<S>(&self, stream: S) -> Result<CompressionResult>
    where
        S: TryStream + Send + 'static,
        S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
        Bytes: From<S::Ok>,
    {
        self.compress_body(reqwest::Body::wrap_stream(stream)).await
    }

    async fn compress_body(&self, body: reqwest::Body) -> Result<CompressionResult> {
        let resp = self.http.post(&self.endpoint).body(body).send().await?;
        json_result(resp).await
    }

    /// Requests a resize of a previously compressed image.
    ///
    /// The target geometry is sent as a JSON payload to the prior result's
    /// retrieval URL; the service replies with fresh result metadata.
    pub async fn resize(
        &self,
        prior: &CompressionResult,
        width: u32,
        height: u32,
        method: ResizeMethod,
    ) -> Result<CompressionResult> {
        if prior.output.url.is_empty() {
            return Err(TinyPngError::MissingOutputUrl);
        }
        if width == 0 || height == 0 {
            return Err(TinyPngError::InvalidDimensions(width, height));
        }

        let request = ResizeRequest {
            resize: ResizeSpec {
                method,
                width,
                height,
            },
        };

        // The service accepts the resize spec as a body-bearing GET on the
        // retrieval URL.
        let resp = self
            .http
            .request(Method::GET, &prior.output.url)
            .json(&request)
            .send()
            .await?;
        json_result(resp).await
    }
}

/// Maps a response to a [`CompressionResult`], turning non-success statuses
/// into the structured API error.
async fn json_result(resp: reqwest::Response) -> Result<CompressionResult> {
    if !resp.status().is_success() {
        return Err(api_error_lenient(resp).await);
    }
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Maps a non-success response to the structured API error, tolerating
/// absent or malformed `{error, message}` bodies.
pub(crate) async fn api_error_lenient(resp: reqwest::Response) -> TinyPngError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let parsed: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();

    TinyPngError::Api {
        status: status.as_u16(),
        reason: reason_phrase(status),
        code: or_unknown(parsed.error),
        message: or_unknown(parsed.message),
    }
}

pub(crate) fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or(UNKNOWN_FIELD)
        .to_string()
}

fn or_unknown(field: String) -> String {
    if field.is_empty() {
        UNKNOWN_FIELD.to_string()
    } else {
        field
    }
}

/// Forms the Basic credential the service expects: `base64("api:<key>")`.
fn basic_credential(api_key: &str) -> String {
    STANDARD.encode(format!("{AUTH_USER}:{api_key}"))
}
