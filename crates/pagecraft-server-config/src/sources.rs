// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	AuthConfigLayer, CorsConfigLayer, HttpConfigLayer, LlmConfigLayer, LogFormat,
	LoggingConfigLayer, PublishConfigLayer, StorageConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/pagecraft/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: PAGECRAFT_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			cors: Some(load_cors_from_env()),
			logging: Some(load_logging_from_env()?),
			auth: Some(load_auth_from_env()),
			llm: Some(load_llm_from_env()),
			storage: Some(load_storage_from_env()?),
			publish: Some(load_publish_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(name) {
		Some(v) => v
			.parse()
			.map(Some)
			.map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				value: v,
			}),
		None => Ok(None),
	}
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v
			.parse()
			.map(Some)
			.map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				value: v,
			}),
		None => Ok(None),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("PAGECRAFT_SERVER_HTTP_HOST"),
		port: env_u16("PAGECRAFT_SERVER_HTTP_PORT")?,
	})
}

fn load_cors_from_env() -> CorsConfigLayer {
	CorsConfigLayer {
		allowed_origins: env_var("PAGECRAFT_SERVER_CORS_ALLOWED_ORIGINS").map(|v| {
			v.split(',')
				.map(|s| s.trim().to_string())
				.filter(|s| !s.is_empty())
				.collect()
		}),
	}
}

fn load_logging_from_env() -> Result<LoggingConfigLayer, ConfigError> {
	let format = match env_var("PAGECRAFT_SERVER_LOGGING_FORMAT") {
		Some(v) => Some(
			v.parse::<LogFormat>()
				.map_err(|_| ConfigError::InvalidValue {
					key: "PAGECRAFT_SERVER_LOGGING_FORMAT".to_string(),
					value: v,
				})?,
		),
		None => None,
	};

	Ok(LoggingConfigLayer {
		level: env_var("PAGECRAFT_SERVER_LOGGING_LEVEL"),
		format,
	})
}

fn load_auth_from_env() -> AuthConfigLayer {
	AuthConfigLayer {
		enabled: env_bool("PAGECRAFT_SERVER_AUTH_ENABLED"),
		base_url: env_var("PAGECRAFT_SERVER_AUTH_BASE_URL"),
	}
}

fn load_llm_from_env() -> LlmConfigLayer {
	LlmConfigLayer {
		model: env_var("PAGECRAFT_SERVER_LLM_MODEL"),
		base_url: env_var("PAGECRAFT_SERVER_LLM_BASE_URL"),
	}
}

fn load_storage_from_env() -> Result<StorageConfigLayer, ConfigError> {
	Ok(StorageConfigLayer {
		bucket: env_var("PAGECRAFT_SERVER_STORAGE_BUCKET"),
		region: env_var("PAGECRAFT_SERVER_STORAGE_REGION"),
		public_base_url: env_var("PAGECRAFT_SERVER_STORAGE_PUBLIC_BASE_URL"),
		signed_url_expiry_secs: env_u64("PAGECRAFT_SERVER_STORAGE_SIGNED_URL_EXPIRY_SECS")?,
	})
}

fn load_publish_from_env() -> Result<PublishConfigLayer, ConfigError> {
	Ok(PublishConfigLayer {
		project_dir: env_var("PAGECRAFT_SERVER_PUBLISH_PROJECT_DIR").map(PathBuf::from),
		output_root: env_var("PAGECRAFT_SERVER_PUBLISH_OUTPUT_ROOT").map(PathBuf::from),
		build_program: env_var("PAGECRAFT_SERVER_PUBLISH_BUILD_PROGRAM"),
		build_args: env_var("PAGECRAFT_SERVER_PUBLISH_BUILD_ARGS")
			.map(|v| v.split_whitespace().map(str::to_string).collect()),
		build_env_var: env_var("PAGECRAFT_SERVER_PUBLISH_BUILD_ENV_VAR"),
		upload_connect_timeout_secs: env_u64(
			"PAGECRAFT_SERVER_PUBLISH_UPLOAD_CONNECT_TIMEOUT_SECS",
		)?,
		upload_read_timeout_secs: env_u64("PAGECRAFT_SERVER_PUBLISH_UPLOAD_READ_TIMEOUT_SECS")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_defaults_source_is_empty() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.publish.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_yields_empty_layer() {
		let source = TomlSource::new("/nonexistent/pagecraft/server.toml");
		let layer = source.load().unwrap();
		assert!(layer.http.is_none());
	}

	#[test]
	fn test_toml_source_parses_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
[http]
host = "127.0.0.1"
port = 9090

[storage]
bucket = "sites"
signed_url_expiry_secs = 120

[publish]
build_program = "pnpm"
build_args = ["run", "prerender"]
"#
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		let http = layer.http.unwrap();
		assert_eq!(http.host.as_deref(), Some("127.0.0.1"));
		assert_eq!(http.port, Some(9090));
		let storage = layer.storage.unwrap();
		assert_eq!(storage.bucket.as_deref(), Some("sites"));
		assert_eq!(storage.signed_url_expiry_secs, Some(120));
		let publish = layer.publish.unwrap();
		assert_eq!(publish.build_program.as_deref(), Some("pnpm"));
	}

	#[test]
	fn test_toml_source_rejects_unknown_fields() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
[http]
hostname = "127.0.0.1"
"#
		)
		.unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}
}
