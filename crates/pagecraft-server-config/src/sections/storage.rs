// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Object storage configuration.
//!
//! The endpoint URL and both credential halves are resolved through the
//! secret provider, never through the TOML file.

use pagecraft_common_config::SecretString;
use serde::Deserialize;

/// Resolved object storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
	/// S3-compatible endpoint URL, e.g. `https://s3.z1storage.com`.
	pub endpoint: Option<String>,
	pub bucket: String,
	pub region: String,
	pub access_key: Option<SecretString>,
	pub secret_key: Option<SecretString>,
	/// Base under which published objects are publicly reachable.
	pub public_base_url: String,
	/// Lifetime of presigned upload URLs.
	pub signed_url_expiry_secs: u64,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			endpoint: None,
			bucket: "page-builder".to_string(),
			region: "default".to_string(),
			access_key: None,
			secret_key: None,
			public_base_url: "https://s3.z1storage.com/page-builder".to_string(),
			signed_url_expiry_secs: 60,
		}
	}
}

impl StorageConfig {
	/// True when endpoint and both credential halves are present.
	pub fn is_configured(&self) -> bool {
		self.endpoint.is_some() && self.access_key.is_some() && self.secret_key.is_some()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfigLayer {
	pub bucket: Option<String>,
	pub region: Option<String>,
	pub public_base_url: Option<String>,
	pub signed_url_expiry_secs: Option<u64>,
}

impl StorageConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.bucket.is_some() {
			self.bucket = other.bucket;
		}
		if other.region.is_some() {
			self.region = other.region;
		}
		if other.public_base_url.is_some() {
			self.public_base_url = other.public_base_url;
		}
		if other.signed_url_expiry_secs.is_some() {
			self.signed_url_expiry_secs = other.signed_url_expiry_secs;
		}
	}

	pub fn finalize(
		self,
		endpoint: Option<String>,
		access_key: Option<SecretString>,
		secret_key: Option<SecretString>,
	) -> StorageConfig {
		let defaults = StorageConfig::default();
		StorageConfig {
			endpoint,
			bucket: self.bucket.unwrap_or(defaults.bucket),
			region: self.region.unwrap_or(defaults.region),
			access_key,
			secret_key,
			public_base_url: self.public_base_url.unwrap_or(defaults.public_base_url),
			signed_url_expiry_secs: self
				.signed_url_expiry_secs
				.unwrap_or(defaults.signed_url_expiry_secs),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let storage = StorageConfigLayer::default().finalize(None, None, None);
		assert_eq!(storage.bucket, "page-builder");
		assert_eq!(storage.region, "default");
		assert_eq!(storage.signed_url_expiry_secs, 60);
		assert!(!storage.is_configured());
	}

	#[test]
	fn test_fully_configured() {
		let storage = StorageConfigLayer::default().finalize(
			Some("https://s3.example.com".to_string()),
			Some(SecretString::new("AK".to_string())),
			Some(SecretString::new("SK".to_string())),
		);
		assert!(storage.is_configured());
	}
}
