// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Synchronous chat-completion client.

use std::time::Duration;

use reqwest::Client;

use crate::error::LlmError;
use crate::types::{OpenAIConfig, OpenAIErrorBody, OpenAIMessage, OpenAIRequest, OpenAIResponse};

/// Total time budget for one completion round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the OpenAI chat-completions API.
pub struct OpenAIClient {
	config: OpenAIConfig,
	http: Client,
}

impl OpenAIClient {
	pub fn new(config: OpenAIConfig) -> Self {
		let http = pagecraft_common_http::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.expect("failed to build HTTP client");
		Self { config, http }
	}

	/// Run one completion: `instructions` as the system message, `input` as
	/// the user message. Returns the model's raw text, unparsed.
	pub async fn complete(&self, instructions: &str, input: &str) -> Result<String, LlmError> {
		let request = OpenAIRequest {
			model: self.config.model.clone(),
			messages: vec![
				OpenAIMessage::system(instructions),
				OpenAIMessage::user(input),
			],
			max_tokens: None,
			temperature: None,
		};

		let url = format!(
			"{}/chat/completions",
			self.config.base_url.trim_end_matches('/')
		);

		tracing::debug!(model = %request.model, "sending completion request");

		let response = self
			.http
			.post(&url)
			.bearer_auth(self.config.api_key.expose())
			.json(&request)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			let message = serde_json::from_str::<OpenAIErrorBody>(&body)
				.map(|b| b.error.message)
				.unwrap_or(body);
			tracing::error!(status = %status, error = %message, "completion request rejected");
			return Err(LlmError::Api {
				status: status.as_u16(),
				message,
			});
		}

		let completion: OpenAIResponse = response.json().await?;

		if let Some(ref usage) = completion.usage {
			tracing::info!(
				model = %completion.model,
				prompt_tokens = usage.prompt_tokens,
				completion_tokens = usage.completion_tokens,
				"completion succeeded"
			);
		}

		completion
			.choices
			.into_iter()
			.next()
			.and_then(|choice| choice.message.content)
			.filter(|content| !content.is_empty())
			.ok_or(LlmError::EmptyResponse)
	}
}
