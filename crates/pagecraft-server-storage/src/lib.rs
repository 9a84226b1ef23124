// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! S3-compatible object store client for Pagecraft.
//!
//! Two operations back the publish workflow:
//! - issue a time-limited presigned PUT URL for an object, so the upload
//!   itself can be driven by any HTTP client without long-lived credentials
//! - finalize a stored object by setting its ACL to public-read
//!
//! Requests are authenticated with AWS Signature Version 4, derived
//! in-process from the configured access/secret key pair.

mod client;
mod error;
pub mod signer;

pub use client::{ObjectStore, S3Config, S3StorageClient};
pub use error::StorageError;
