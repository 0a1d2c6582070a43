//! Download of compressed results, with metadata preservation.

use std::path::Path;

use bytes::Bytes;
use futures_util::Stream;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use tokio::io::AsyncWriteExt;

use crate::client::{reason_phrase, TinyPngClient};
use crate::error::{Result, TinyPngError};
use crate::metadata::PreserveMetadata;
use crate::types::{ApiErrorBody, CompressionResult};

impl TinyPngClient {
    /// Downloads the bytes behind a compression result.
    ///
    /// `metadata` selects which fields the service should retain in the
    /// output; the selection is validated against the result's output type
    /// before any network call. The response body is not buffered until
    /// asked for.
    pub async fn download(
        &self,
        prior: &CompressionResult,
        metadata: PreserveMetadata,
    ) -> Result<ImageResponse> {
        if prior.output.url.is_empty() {
            return Err(TinyPngError::MissingOutputUrl);
        }

        let mut request = self.http().request(Method::GET, &prior.output.url);
        if let Some(body) = metadata.preserve_body(&prior.output.content_type)? {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(ImageResponse { inner: resp });
        }

        // A failed download carries a JSON error body; anything else is
        // unrecoverable for this call and surfaces as a JSON error.
        let body = resp.bytes().await?;
        let parsed: ApiErrorBody = serde_json::from_slice(&body)?;
        Err(TinyPngError::Api {
            status: status.as_u16(),
            reason: reason_phrase(status),
            code: parsed.error,
            message: parsed.message,
        })
    }
}

/// A downloaded image: status, headers, and lazy access to the body.
#[derive(Debug)]
pub struct ImageResponse {
    inner: reqwest::Response,
}

impl ImageResponse {
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Content type reported by the service, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.inner.headers().get(CONTENT_TYPE)?.to_str().ok()
    }

    /// Body length reported by the service, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.inner.content_length()
    }

    /// Buffers the whole image and returns its bytes.
    pub async fn bytes(self) -> Result<Bytes> {
        Ok(self.inner.bytes().await?)
    }

    /// Streams the image chunk by chunk.
    pub fn bytes_stream(self) -> impl Stream<Item = reqwest::Result<Bytes>> {
        self.inner.bytes_stream()
    }

    /// The underlying HTTP response, for callers that want full control.
    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }

    /// Streams the image to a file on disk, returning the bytes written.
    pub async fn save_to_file(self, path: &Path) -> Result<u64> {
        let mut file = tokio::fs::File::create(path).await?;
        let mut resp = self.inner;
        let mut written = 0u64;
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }
}
