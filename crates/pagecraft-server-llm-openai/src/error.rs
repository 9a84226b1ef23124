// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! LLM client error taxonomy.

/// Errors from a completion request.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
	/// Transport-level failure (connect, TLS, timeout, body read).
	#[error("LLM request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// The API answered with a non-success status.
	#[error("LLM API error (status {status}): {message}")]
	Api { status: u16, message: String },

	/// The API answered 200 but carried no usable text.
	#[error("LLM API returned an empty completion")]
	EmptyResponse,
}
