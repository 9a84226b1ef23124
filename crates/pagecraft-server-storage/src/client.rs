// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Object store client over the S3 wire protocol.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use pagecraft_common_secret::SecretString;
use reqwest::Client;
use url::Url;

use crate::error::StorageError;
use crate::signer::{host_header, object_uri, RequestSigner, EMPTY_PAYLOAD_SHA256};

/// Time budget for ACL calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the S3 client.
#[derive(Debug, Clone)]
pub struct S3Config {
	pub endpoint: String,
	pub bucket: String,
	pub region: String,
	pub access_key: String,
	pub secret_key: SecretString,
}

/// Seam between the publish workflow and the object store, so the workflow
/// can be exercised with a spy store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
	/// Issue a presigned PUT URL for `key` with the given content type.
	fn presigned_put_url(
		&self,
		key: &str,
		content_type: &str,
		expires_in: Duration,
	) -> Result<String, StorageError>;

	/// Mark a stored object as publicly readable.
	async fn set_public_read(&self, key: &str) -> Result<(), StorageError>;
}

/// S3-compatible store client (path-style addressing).
#[derive(Debug)]
pub struct S3StorageClient {
	endpoint: Url,
	bucket: String,
	signer: RequestSigner,
	http: Client,
}

impl S3StorageClient {
	pub fn new(config: S3Config) -> Result<Self, StorageError> {
		let endpoint = Url::parse(&config.endpoint)
			.map_err(|e| StorageError::Endpoint(format!("{}: {e}", config.endpoint)))?;
		// Fail on endpoints without a host before the first request.
		host_header(&endpoint)?;

		let http = pagecraft_common_http::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.expect("failed to build HTTP client");

		Ok(Self {
			endpoint,
			bucket: config.bucket,
			signer: RequestSigner::new(config.access_key, config.secret_key, config.region),
			http,
		})
	}
}

#[async_trait]
impl ObjectStore for S3StorageClient {
	fn presigned_put_url(
		&self,
		key: &str,
		content_type: &str,
		expires_in: Duration,
	) -> Result<String, StorageError> {
		self.signer.presign_put(
			&self.endpoint,
			&self.bucket,
			key,
			content_type,
			expires_in.as_secs(),
			Utc::now(),
		)
	}

	async fn set_public_read(&self, key: &str) -> Result<(), StorageError> {
		let now = Utc::now();
		let host = host_header(&self.endpoint)?;
		let canonical_uri = object_uri(&self.bucket, key);
		let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

		let signed_headers = [
			("host".to_string(), host.clone()),
			("x-amz-acl".to_string(), "public-read".to_string()),
			(
				"x-amz-content-sha256".to_string(),
				EMPTY_PAYLOAD_SHA256.to_string(),
			),
			("x-amz-date".to_string(), amz_date.clone()),
		];

		let authorization = self.signer.authorization(
			"PUT",
			&canonical_uri,
			"acl=",
			&signed_headers,
			EMPTY_PAYLOAD_SHA256,
			now,
		);

		let mut url = self.endpoint.clone();
		url.set_path(&canonical_uri);
		url.set_query(Some("acl"));

		let response = self
			.http
			.put(url)
			.header("authorization", authorization)
			.header("x-amz-acl", "public-read")
			.header("x-amz-content-sha256", EMPTY_PAYLOAD_SHA256)
			.header("x-amz-date", amz_date)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			tracing::error!(key = %key, status = %status, "ACL change rejected");
			return Err(StorageError::AclRejected {
				status: status.as_u16(),
				body,
			});
		}

		tracing::debug!(key = %key, "object marked public-read");
		Ok(())
	}
}
