// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Website publishing workflow for Pagecraft.
//!
//! One publish run takes an identifier through a fixed sequence: invoke the
//! static-site generator, read the rendered artifact from disk, request a
//! presigned upload URL, PUT the artifact, mark the object public-read, and
//! return the derived public URL. Every step that can fail yields a tagged
//! [`PublishError`] so callers can tell a build fault from a storage fault.
//!
//! Runs for the same identifier are serialized through a keyed lock table;
//! distinct identifiers publish concurrently.

pub mod build;
pub mod error;
pub mod locks;
pub mod paths;
pub mod upload;
pub mod workflow;

pub use build::{BuildError, BuildInvoker, BuildOutput, CommandBuildInvoker};
pub use error::PublishError;
pub use locks::KeyedLocks;
pub use upload::{ArtifactUploader, HttpArtifactUploader, UploadError, UploadOutcome};
pub use workflow::{PublishWorkflow, WorkflowConfig, HTML_CONTENT_TYPE};
