// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Object store error types.

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
	/// The configured endpoint URL is unusable.
	#[error("invalid storage endpoint: {0}")]
	Endpoint(String),

	/// Transport-level failure reaching the store.
	#[error("storage request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// The store refused the ACL change.
	#[error("ACL change rejected (status {status}): {body}")]
	AclRejected { status: u16, body: String },
}
