// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Publish workflow error taxonomy.

use std::path::PathBuf;

use pagecraft_server_storage::StorageError;

use crate::build::BuildError;
use crate::upload::UploadError;

/// Tagged failure of one publish run.
///
/// Each variant names the step that aborted the run, carrying the captured
/// diagnostic so the endpoint layer can map it to a distinct status.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
	/// The static-site generator failed; nothing was uploaded.
	#[error(transparent)]
	Build(#[from] BuildError),

	/// The rendered artifact could not be read from disk.
	#[error("failed to read build artifact {path}: {source}")]
	ArtifactRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The store refused to issue a signed upload URL.
	#[error("failed to issue signed upload URL: {0}")]
	SignUrl(StorageError),

	/// The upload request itself failed in transport.
	#[error(transparent)]
	Upload(#[from] UploadError),

	/// The store answered the upload PUT with a non-200 status; the ACL
	/// call was not made.
	#[error("artifact upload rejected (status {status}): {body}")]
	UploadFailed { status: u16, body: String },

	/// The object was uploaded but could not be made public.
	#[error("failed to finalize object ACL: {0}")]
	Acl(StorageError),
}
