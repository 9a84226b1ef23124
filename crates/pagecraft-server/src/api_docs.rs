// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! OpenAPI documentation assembly.

use utoipa::OpenApi;

/// OpenAPI document for the Pagecraft server.
#[derive(OpenApi)]
#[openapi(
	paths(
		crate::routes::generate::generate_content,
		crate::routes::publish::publish_website,
		crate::routes::health::health_check,
	),
	components(schemas(
		crate::routes::generate::GenerateContentRequest,
		crate::routes::health::HealthResponse,
		crate::error::ErrorResponse,
	)),
	tags(
		(name = "content", description = "LLM-backed content generation"),
		(name = "publish", description = "Website build and publish"),
		(name = "health", description = "Service health"),
	)
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_openapi_document_lists_all_routes() {
		let doc = ApiDoc::openapi();
		let paths: Vec<&String> = doc.paths.paths.keys().collect();
		assert!(paths.iter().any(|p| p.as_str() == "/generate-content"));
		assert!(paths
			.iter()
			.any(|p| p.as_str() == "/publish-website/{identifier}"));
		assert!(paths.iter().any(|p| p.as_str() == "/health"));
	}
}
