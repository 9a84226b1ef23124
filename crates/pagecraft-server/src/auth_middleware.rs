// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bearer-token authentication middleware.
//!
//! Installed in front of both work endpoints. When no verifier is
//! configured the gate passes everything through (the unauthenticated
//! deployment variant); otherwise the token must verify before any build
//! or storage work starts. Verified claims are attached as a request
//! extension.

use axum::{
	extract::{Request, State},
	http::header::AUTHORIZATION,
	http::HeaderMap,
	middleware::Next,
	response::Response,
};
use tracing::warn;

use crate::{api::AppState, error::ServerError};

/// Authenticate the request, attaching [`TokenClaims`] on success.
///
/// [`TokenClaims`]: pagecraft_server_auth_firebase::TokenClaims
pub async fn require_bearer(
	State(state): State<AppState>,
	mut request: Request,
	next: Next,
) -> Result<Response, ServerError> {
	let Some(verifier) = state.verifier.clone() else {
		return Ok(next.run(request).await);
	};

	let token = bearer_token(request.headers())
		.ok_or_else(|| {
			ServerError::Unauthorized("missing or invalid Authorization header".to_string())
		})?
		.to_string();

	let claims = verifier.verify(&token).await.map_err(|e| {
		warn!(error = %e, "authentication failed");
		ServerError::Unauthorized("invalid authentication credentials".to_string())
	})?;

	request.extensions_mut().insert(claims);
	Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	headers
		.get(AUTHORIZATION)?
		.to_str()
		.ok()?
		.strip_prefix("Bearer ")
		.map(str::trim)
		.filter(|token| !token.is_empty())
}
