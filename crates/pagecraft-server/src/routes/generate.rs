// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Content generation HTTP handler.

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{api::AppState, error::ServerError};

/// Instruction template used when the caller supplies none. Requests the
/// landing-page shape the frontend renders: one hero section and exactly
/// three features, as bare JSON.
pub const LANDING_PAGE_INSTRUCTIONS: &str = "You write landing page copy. From the user's \
description of their business, respond with a single JSON object of the shape \
{\"hero\": {\"headline\": string, \"subheadline\": string}, \"features\": [{\"title\": string, \
\"description\": string}]} where \"features\" has exactly three entries. Respond with JSON only, \
no markdown fences or commentary.";

/// Request body for content generation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateContentRequest {
	/// Free-text description of the site to generate copy for.
	pub input: String,
	/// Optional override of the built-in instruction template.
	#[serde(default)]
	pub instructions: Option<String>,
}

#[utoipa::path(
    post,
    path = "/generate-content",
    request_body = GenerateContentRequest,
    responses(
        (status = 200, description = "Raw model output, typically JSON", content_type = "text/plain"),
        (status = 401, description = "Missing or invalid bearer token", body = crate::error::ErrorResponse),
        (status = 502, description = "LLM API failure", body = crate::error::ErrorResponse)
    ),
    tag = "content"
)]
/// POST /generate-content - Generate website copy from a description.
///
/// Forwards the description plus the instruction template to the LLM and
/// returns the model's text unparsed; the caller handles malformed JSON.
#[axum::debug_handler]
pub async fn generate_content(
	State(state): State<AppState>,
	Json(payload): Json<GenerateContentRequest>,
) -> Result<String, ServerError> {
	tracing::debug!(
		input_len = payload.input.len(),
		custom_instructions = payload.instructions.is_some(),
		"generate_content: sending completion request"
	);

	let instructions = payload
		.instructions
		.as_deref()
		.unwrap_or(LANDING_PAGE_INSTRUCTIONS);

	let text = state.llm.complete(instructions, &payload.input).await?;

	tracing::info!(
		output_len = text.len(),
		"generate_content: returning model output"
	);
	Ok(text)
}
