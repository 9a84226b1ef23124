// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! LLM completion API configuration.

use pagecraft_common_config::SecretString;
use serde::Deserialize;

/// Resolved LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
	/// Model identifier sent with every completion request.
	pub model: String,
	pub base_url: String,
	/// API key, resolved through the secret provider.
	pub api_key: Option<SecretString>,
}

impl Default for LlmConfig {
	fn default() -> Self {
		Self {
			model: "gpt-5".to_string(),
			base_url: "https://api.openai.com/v1".to_string(),
			api_key: None,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfigLayer {
	pub model: Option<String>,
	pub base_url: Option<String>,
}

impl LlmConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.model.is_some() {
			self.model = other.model;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
	}

	pub fn finalize(self, api_key: Option<SecretString>) -> LlmConfig {
		let defaults = LlmConfig::default();
		LlmConfig {
			model: self.model.unwrap_or(defaults.model),
			base_url: self.base_url.unwrap_or(defaults.base_url),
			api_key,
		}
	}
}
