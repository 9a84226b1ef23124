// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Artifact transfer to a presigned URL.
//!
//! The transfer is deliberately decoupled from the credentialed store
//! client: the signed URL is the only capability the upload needs, so any
//! HTTP client can drive it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Result of a completed PUT, whatever its status.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
	pub status: u16,
	pub body: String,
}

/// Transport-level upload failure (connect, TLS, timeout).
#[derive(Debug, thiserror::Error)]
#[error("artifact upload request failed: {0}")]
pub struct UploadError(#[from] reqwest::Error);

/// Seam between the workflow and the upload transport.
#[async_trait]
pub trait ArtifactUploader: Send + Sync {
	/// PUT `body` to `url` with the given content type, returning the
	/// response status and body text.
	async fn put(
		&self,
		url: &str,
		content_type: &str,
		body: Vec<u8>,
	) -> Result<UploadOutcome, UploadError>;
}

/// Uploader with split connect/read timeouts.
pub struct HttpArtifactUploader {
	http: Client,
}

impl HttpArtifactUploader {
	pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
		let http = pagecraft_common_http::builder()
			.connect_timeout(connect_timeout)
			.read_timeout(read_timeout)
			.build()
			.expect("failed to build HTTP client");
		Self { http }
	}
}

#[async_trait]
impl ArtifactUploader for HttpArtifactUploader {
	async fn put(
		&self,
		url: &str,
		content_type: &str,
		body: Vec<u8>,
	) -> Result<UploadOutcome, UploadError> {
		let response = self
			.http
			.put(url)
			.header(CONTENT_TYPE, content_type)
			.body(body)
			.send()
			.await?;

		let status = response.status().as_u16();
		let body = response.text().await.unwrap_or_default();
		Ok(UploadOutcome { status, body })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_unreachable_url_is_transport_error() {
		let uploader =
			HttpArtifactUploader::new(Duration::from_millis(200), Duration::from_millis(200));
		let err = uploader
			.put("http://127.0.0.1:1/bucket/key", "text/html", b"<html></html>".to_vec())
			.await
			.unwrap_err();
		assert!(err.to_string().contains("upload request failed"));
	}
}
