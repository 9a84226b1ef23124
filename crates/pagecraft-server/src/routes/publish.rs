// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Website publishing HTTP handler.

use axum::extract::{Path, State};

use crate::{
	api::AppState,
	error::ServerError,
	validation::{validate_identifier, MAX_IDENTIFIER_LEN},
};

#[utoipa::path(
    post,
    path = "/publish-website/{identifier}",
    params(
        ("identifier" = String, Path, description = "Site identifier; becomes the storage key and public URL path")
    ),
    responses(
        (status = 200, description = "Public website URL", content_type = "text/plain"),
        (status = 400, description = "Invalid identifier", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::error::ErrorResponse),
        (status = 500, description = "Build or artifact failure", body = crate::error::ErrorResponse),
        (status = 502, description = "Upload or storage failure", body = crate::error::ErrorResponse)
    ),
    tag = "publish"
)]
/// POST /publish-website/{identifier} - Build and publish a site.
///
/// Runs the full publish sequence and returns the public URL. Failures map
/// to distinct statuses per step; see [`crate::error::ServerError`].
#[axum::debug_handler]
pub async fn publish_website(
	State(state): State<AppState>,
	Path(identifier): Path<String>,
) -> Result<String, ServerError> {
	if !validate_identifier(&identifier) {
		return Err(ServerError::BadRequest(format!(
			"invalid identifier: must be 1-{MAX_IDENTIFIER_LEN} lowercase letters, digits, or \
			 hyphens, not starting or ending with a hyphen"
		)));
	}

	tracing::info!(identifier = %identifier, "publish_website: starting publish");

	let url = state.publisher.publish(&identifier).await?;

	tracing::info!(identifier = %identifier, url = %url, "publish_website: published");
	Ok(url)
}
