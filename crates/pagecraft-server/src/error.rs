// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error type and HTTP status mapping.
//!
//! Every workflow failure is tagged, so the endpoint layer can answer with
//! a distinct status and a structured body instead of an empty response:
//! build and artifact faults are server-side (500), storage and LLM faults
//! are upstream (502).

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use pagecraft_server_llm_openai::LlmError;
use pagecraft_server_publish::PublishError;
use serde::Serialize;
use utoipa::ToSchema;

/// Structured error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
	/// Stable machine-readable code, e.g. `build_failed`.
	pub error: String,
	/// Human-readable diagnostic.
	pub message: String,
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("{0}")]
	BadRequest(String),

	#[error("{0}")]
	Unauthorized(String),

	#[error("{0}")]
	BuildFailed(String),

	#[error("{0}")]
	ArtifactUnavailable(String),

	#[error("{0}")]
	UploadFailed(String),

	#[error("{0}")]
	StorageFailed(String),

	#[error("{0}")]
	LlmFailed(String),

	#[error("{0}")]
	Internal(String),
}

impl ServerError {
	fn status_and_code(&self) -> (StatusCode, &'static str) {
		match self {
			ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
			ServerError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
			ServerError::BuildFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "build_failed"),
			ServerError::ArtifactUnavailable(_) => {
				(StatusCode::INTERNAL_SERVER_ERROR, "artifact_read_failed")
			}
			ServerError::UploadFailed(_) => (StatusCode::BAD_GATEWAY, "upload_failed"),
			ServerError::StorageFailed(_) => (StatusCode::BAD_GATEWAY, "storage_failed"),
			ServerError::LlmFailed(_) => (StatusCode::BAD_GATEWAY, "llm_failed"),
			ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, code) = self.status_and_code();
		let body = ErrorResponse {
			error: code.to_string(),
			message: self.to_string(),
		};
		(status, Json(body)).into_response()
	}
}

impl From<PublishError> for ServerError {
	fn from(err: PublishError) -> Self {
		match err {
			PublishError::Build(e) => ServerError::BuildFailed(e.to_string()),
			e @ PublishError::ArtifactRead { .. } => ServerError::ArtifactUnavailable(e.to_string()),
			PublishError::SignUrl(e) => ServerError::StorageFailed(e.to_string()),
			PublishError::Upload(e) => ServerError::UploadFailed(e.to_string()),
			e @ PublishError::UploadFailed { .. } => ServerError::UploadFailed(e.to_string()),
			PublishError::Acl(e) => ServerError::StorageFailed(e.to_string()),
		}
	}
}

impl From<LlmError> for ServerError {
	fn from(err: LlmError) -> Self {
		ServerError::LlmFailed(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pagecraft_server_publish::BuildError;

	#[test]
	fn test_status_mapping_is_distinct_per_fault_domain() {
		let cases = [
			(
				ServerError::BadRequest("x".into()),
				StatusCode::BAD_REQUEST,
				"bad_request",
			),
			(
				ServerError::Unauthorized("x".into()),
				StatusCode::UNAUTHORIZED,
				"unauthorized",
			),
			(
				ServerError::BuildFailed("x".into()),
				StatusCode::INTERNAL_SERVER_ERROR,
				"build_failed",
			),
			(
				ServerError::UploadFailed("x".into()),
				StatusCode::BAD_GATEWAY,
				"upload_failed",
			),
			(
				ServerError::LlmFailed("x".into()),
				StatusCode::BAD_GATEWAY,
				"llm_failed",
			),
		];

		for (err, status, code) in cases {
			let (s, c) = err.status_and_code();
			assert_eq!(s, status);
			assert_eq!(c, code);
		}
	}

	#[test]
	fn test_publish_build_failure_maps_to_build_failed() {
		let err: ServerError = PublishError::Build(BuildError::Failed {
			exit_code: Some(1),
			stderr: "ng build exploded".to_string(),
		})
		.into();
		assert!(matches!(err, ServerError::BuildFailed(_)));
		assert!(err.to_string().contains("ng build exploded"));
	}

	#[test]
	fn test_publish_upload_rejection_maps_to_upload_failed() {
		let err: ServerError = PublishError::UploadFailed {
			status: 403,
			body: "AccessDenied".to_string(),
		}
		.into();
		assert!(matches!(err, ServerError::UploadFailed(_)));
	}
}
