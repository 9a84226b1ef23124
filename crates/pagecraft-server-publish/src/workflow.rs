// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The publish state sequence: build, read, presign, upload, finalize.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pagecraft_server_storage::ObjectStore;
use tracing::{error, info, instrument};

use crate::build::BuildInvoker;
use crate::error::PublishError;
use crate::locks::KeyedLocks;
use crate::paths;
use crate::upload::ArtifactUploader;

/// Content type of every published artifact.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Workflow parameters derived from server configuration.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
	/// Root under which the generator writes `{identifier}/index.html`.
	pub output_root: PathBuf,
	/// Base under which published objects are publicly reachable.
	pub public_base_url: String,
	/// Lifetime of presigned upload URLs.
	pub signed_url_expiry: Duration,
}

/// Orchestrates one publish run per call.
///
/// All collaborators are injected, so the sequence can be exercised with
/// fakes: a failing build must leave the store untouched, a rejected upload
/// must leave the ACL untouched.
pub struct PublishWorkflow {
	invoker: Arc<dyn BuildInvoker>,
	store: Arc<dyn ObjectStore>,
	uploader: Arc<dyn ArtifactUploader>,
	locks: KeyedLocks,
	config: WorkflowConfig,
}

impl PublishWorkflow {
	pub fn new(
		invoker: Arc<dyn BuildInvoker>,
		store: Arc<dyn ObjectStore>,
		uploader: Arc<dyn ArtifactUploader>,
		config: WorkflowConfig,
	) -> Self {
		Self {
			invoker,
			store,
			uploader,
			locks: KeyedLocks::new(),
			config,
		}
	}

	/// Publish one identifier, returning the public URL.
	///
	/// Holds the identifier's lock across the whole sequence so overlapping
	/// requests for the same site cannot race on the output directory or
	/// the storage key.
	#[instrument(skip(self))]
	pub async fn publish(&self, identifier: &str) -> Result<String, PublishError> {
		let _guard = self.locks.acquire(identifier).await;

		info!("publishing website");
		self.invoker.build(identifier).await?;

		let path = paths::artifact_path(&self.config.output_root, identifier);
		let content =
			tokio::fs::read(&path)
				.await
				.map_err(|source| PublishError::ArtifactRead {
					path: path.clone(),
					source,
				})?;

		let key = paths::storage_key(identifier);
		let upload_url = self
			.store
			.presigned_put_url(&key, HTML_CONTENT_TYPE, self.config.signed_url_expiry)
			.map_err(PublishError::SignUrl)?;

		info!(key = %key, bytes = content.len(), "uploading artifact");
		let outcome = self
			.uploader
			.put(&upload_url, HTML_CONTENT_TYPE, content)
			.await?;
		if outcome.status != 200 {
			error!(
				key = %key,
				status = outcome.status,
				body = %outcome.body,
				"artifact upload rejected"
			);
			return Err(PublishError::UploadFailed {
				status: outcome.status,
				body: outcome.body,
			});
		}

		self.store
			.set_public_read(&key)
			.await
			.map_err(PublishError::Acl)?;

		let website_url = paths::website_url(&self.config.public_base_url, identifier);
		info!(url = %website_url, "website published");
		Ok(website_url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::build::{BuildError, BuildOutput};
	use crate::upload::{UploadError, UploadOutcome};
	use async_trait::async_trait;
	use pagecraft_server_storage::StorageError;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Mutex;
	use tempfile::TempDir;

	const BASE_URL: &str = "https://s3.z1storage.com/page-builder";

	struct FakeBuild {
		fail: bool,
		delay: Option<Duration>,
		calls: AtomicUsize,
		in_flight: AtomicUsize,
		max_in_flight: AtomicUsize,
	}

	impl FakeBuild {
		fn ok() -> Self {
			Self {
				fail: false,
				delay: None,
				calls: AtomicUsize::new(0),
				in_flight: AtomicUsize::new(0),
				max_in_flight: AtomicUsize::new(0),
			}
		}

		fn failing() -> Self {
			Self {
				fail: true,
				..Self::ok()
			}
		}

		fn slow() -> Self {
			Self {
				delay: Some(Duration::from_millis(30)),
				..Self::ok()
			}
		}
	}

	#[async_trait]
	impl BuildInvoker for FakeBuild {
		async fn build(&self, _identifier: &str) -> Result<BuildOutput, BuildError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
			self.max_in_flight.fetch_max(current, Ordering::SeqCst);

			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}

			self.in_flight.fetch_sub(1, Ordering::SeqCst);

			if self.fail {
				return Err(BuildError::Failed {
					exit_code: Some(1),
					stderr: "ng build exploded".to_string(),
				});
			}
			Ok(BuildOutput {
				stdout: String::new(),
				stderr: String::new(),
			})
		}
	}

	#[derive(Default)]
	struct SpyStore {
		presign_calls: Mutex<Vec<String>>,
		acl_calls: Mutex<Vec<String>>,
	}

	#[async_trait]
	impl ObjectStore for SpyStore {
		fn presigned_put_url(
			&self,
			key: &str,
			_content_type: &str,
			_expires_in: Duration,
		) -> Result<String, StorageError> {
			self.presign_calls.lock().unwrap().push(key.to_string());
			Ok(format!("https://signed.example/{key}"))
		}

		async fn set_public_read(&self, key: &str) -> Result<(), StorageError> {
			self.acl_calls.lock().unwrap().push(key.to_string());
			Ok(())
		}
	}

	struct ScriptedUploader {
		status: u16,
		calls: AtomicUsize,
	}

	impl ScriptedUploader {
		fn with_status(status: u16) -> Self {
			Self {
				status,
				calls: AtomicUsize::new(0),
			}
		}
	}

	#[async_trait]
	impl ArtifactUploader for ScriptedUploader {
		async fn put(
			&self,
			_url: &str,
			_content_type: &str,
			_body: Vec<u8>,
		) -> Result<UploadOutcome, UploadError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Ok(UploadOutcome {
				status: self.status,
				body: if self.status == 200 {
					String::new()
				} else {
					"AccessDenied".to_string()
				},
			})
		}
	}

	struct Fixture {
		workflow: PublishWorkflow,
		build: Arc<FakeBuild>,
		store: Arc<SpyStore>,
		uploader: Arc<ScriptedUploader>,
		_output_root: TempDir,
	}

	fn fixture(build: FakeBuild, upload_status: u16, identifiers: &[&str]) -> Fixture {
		let output_root = TempDir::new().unwrap();
		for identifier in identifiers {
			let dir = output_root.path().join(identifier);
			std::fs::create_dir_all(&dir).unwrap();
			std::fs::write(dir.join("index.html"), "<html>site</html>").unwrap();
		}

		let build = Arc::new(build);
		let store = Arc::new(SpyStore::default());
		let uploader = Arc::new(ScriptedUploader::with_status(upload_status));

		let workflow = PublishWorkflow::new(
			Arc::clone(&build) as Arc<dyn BuildInvoker>,
			Arc::clone(&store) as Arc<dyn ObjectStore>,
			Arc::clone(&uploader) as Arc<dyn ArtifactUploader>,
			WorkflowConfig {
				output_root: output_root.path().to_path_buf(),
				public_base_url: BASE_URL.to_string(),
				signed_url_expiry: Duration::from_secs(60),
			},
		);

		Fixture {
			workflow,
			build,
			store,
			uploader,
			_output_root: output_root,
		}
	}

	#[tokio::test]
	async fn test_build_failure_aborts_before_any_storage_work() {
		let f = fixture(FakeBuild::failing(), 200, &["u-1"]);

		let err = f.workflow.publish("u-1").await.unwrap_err();
		assert!(matches!(err, PublishError::Build(_)));
		assert!(err.to_string().contains("ng build exploded"));

		assert!(f.store.presign_calls.lock().unwrap().is_empty());
		assert_eq!(f.uploader.calls.load(Ordering::SeqCst), 0);
		assert!(f.store.acl_calls.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_missing_artifact_is_fatal() {
		// Build "succeeds" but never wrote the artifact.
		let f = fixture(FakeBuild::ok(), 200, &[]);

		let err = f.workflow.publish("u-1").await.unwrap_err();
		assert!(matches!(err, PublishError::ArtifactRead { .. }));
		assert!(f.store.presign_calls.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_rejected_upload_skips_acl() {
		let f = fixture(FakeBuild::ok(), 403, &["u-1"]);

		let err = f.workflow.publish("u-1").await.unwrap_err();
		match err {
			PublishError::UploadFailed { status, body } => {
				assert_eq!(status, 403);
				assert_eq!(body, "AccessDenied");
			}
			other => panic!("expected UploadFailed, got {other:?}"),
		}

		assert_eq!(f.store.presign_calls.lock().unwrap().as_slice(), ["u-1.html"]);
		assert_eq!(f.uploader.calls.load(Ordering::SeqCst), 1);
		assert!(f.store.acl_calls.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_successful_publish_finalizes_acl_once_and_derives_url() {
		let f = fixture(FakeBuild::ok(), 200, &["u-1"]);

		let url = f.workflow.publish("u-1").await.unwrap();
		assert_eq!(url, format!("{BASE_URL}/u-1.html"));

		assert_eq!(f.store.presign_calls.lock().unwrap().as_slice(), ["u-1.html"]);
		assert_eq!(f.store.acl_calls.lock().unwrap().as_slice(), ["u-1.html"]);
		assert_eq!(f.uploader.calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_same_identifier_publishes_are_serialized() {
		let f = fixture(FakeBuild::slow(), 200, &["u-1"]);

		let (a, b) = tokio::join!(f.workflow.publish("u-1"), f.workflow.publish("u-1"));
		assert!(a.is_ok());
		assert!(b.is_ok());

		assert_eq!(f.build.calls.load(Ordering::SeqCst), 2);
		assert_eq!(
			f.build.max_in_flight.load(Ordering::SeqCst),
			1,
			"builds for the same identifier must not overlap"
		);
	}

	#[tokio::test]
	async fn test_distinct_identifiers_publish_concurrently() {
		let f = fixture(FakeBuild::slow(), 200, &["u-1", "u-2"]);

		let (a, b) = tokio::join!(f.workflow.publish("u-1"), f.workflow.publish("u-2"));
		assert_eq!(a.unwrap(), format!("{BASE_URL}/u-1.html"));
		assert_eq!(b.unwrap(), format!("{BASE_URL}/u-2.html"));
		assert_eq!(f.build.calls.load(Ordering::SeqCst), 2);
	}
}
