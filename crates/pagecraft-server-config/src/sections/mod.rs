// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Typed configuration sections.
//!
//! Each section has a resolved form (`XConfig`) and a partial, mergeable
//! form (`XConfigLayer`) that sources produce. Layers from higher-precedence
//! sources overwrite individual fields of lower ones; `finalize` fills the
//! gaps with defaults.

mod llm;
mod publish;
mod storage;

pub use llm::{LlmConfig, LlmConfigLayer};
pub use publish::{PublishConfig, PublishConfigLayer};
pub use storage::{StorageConfig, StorageConfigLayer};

use pagecraft_common_config::SecretString;
use serde::Deserialize;

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 8080,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfigLayer {
	pub host: Option<String>,
	pub port: Option<u16>,
}

impl HttpConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.port.is_some() {
			self.port = other.port;
		}
	}

	pub fn finalize(self) -> HttpConfig {
		let defaults = HttpConfig::default();
		HttpConfig {
			host: self.host.unwrap_or(defaults.host),
			port: self.port.unwrap_or(defaults.port),
		}
	}
}

/// Cross-origin request configuration.
#[derive(Debug, Clone)]
pub struct CorsConfig {
	pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
	fn default() -> Self {
		Self {
			allowed_origins: vec!["http://localhost:4200".to_string()],
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfigLayer {
	pub allowed_origins: Option<Vec<String>>,
}

impl CorsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.allowed_origins.is_some() {
			self.allowed_origins = other.allowed_origins;
		}
	}

	pub fn finalize(self) -> CorsConfig {
		CorsConfig {
			allowed_origins: self
				.allowed_origins
				.unwrap_or_else(|| CorsConfig::default().allowed_origins),
		}
	}
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Text,
	Json,
}

impl std::str::FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"text" => Ok(LogFormat::Text),
			"json" => Ok(LogFormat::Json),
			other => Err(format!("unknown log format: {other}")),
		}
	}
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Text,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
	pub format: Option<LogFormat>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		let defaults = LoggingConfig::default();
		LoggingConfig {
			level: self.level.unwrap_or(defaults.level),
			format: self.format.unwrap_or(defaults.format),
		}
	}
}

/// Bearer-token verification configuration.
///
/// When `enabled` is false the auth gate is not installed and both
/// endpoints accept anonymous requests.
#[derive(Debug, Clone)]
pub struct AuthConfig {
	pub enabled: bool,
	pub base_url: String,
	/// Identity Toolkit API key, resolved through the secret provider.
	pub api_key: Option<SecretString>,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			base_url: "https://identitytoolkit.googleapis.com/v1".to_string(),
			api_key: None,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfigLayer {
	pub enabled: Option<bool>,
	pub base_url: Option<String>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
	}

	pub fn finalize(self, api_key: Option<SecretString>) -> AuthConfig {
		let defaults = AuthConfig::default();
		AuthConfig {
			enabled: self.enabled.unwrap_or(defaults.enabled),
			base_url: self.base_url.unwrap_or(defaults.base_url),
			api_key,
		}
	}
}
