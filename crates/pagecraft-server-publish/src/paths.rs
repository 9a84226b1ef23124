// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Deterministic derivations from an identifier.
//!
//! The artifact path, storage key, and public URL are pure functions of the
//! identifier; no lookup table exists anywhere in the system.

use std::path::{Path, PathBuf};

/// Local filesystem path of the rendered artifact for an identifier.
pub fn artifact_path(output_root: &Path, identifier: &str) -> PathBuf {
	output_root.join(identifier).join("index.html")
}

/// Object store key for an identifier.
pub fn storage_key(identifier: &str) -> String {
	format!("{identifier}.html")
}

/// Public URL under which the published site is reachable.
pub fn website_url(public_base_url: &str, identifier: &str) -> String {
	format!(
		"{}/{identifier}.html",
		public_base_url.trim_end_matches('/')
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_artifact_path_layout() {
		let path = artifact_path(Path::new("/ssr/dist/out"), "u-1");
		assert_eq!(path, PathBuf::from("/ssr/dist/out/u-1/index.html"));
	}

	#[test]
	fn test_storage_key_appends_extension() {
		assert_eq!(storage_key("u-1"), "u-1.html");
	}

	#[test]
	fn test_website_url_derivation() {
		assert_eq!(
			website_url("https://s3.z1storage.com/page-builder", "u-1"),
			"https://s3.z1storage.com/page-builder/u-1.html"
		);
	}

	#[test]
	fn test_website_url_tolerates_trailing_slash() {
		assert_eq!(
			website_url("https://s3.z1storage.com/page-builder/", "u-1"),
			"https://s3.z1storage.com/page-builder/u-1.html"
		);
	}
}
