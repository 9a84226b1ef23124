// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the Pagecraft server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file,
//!   environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`PAGECRAFT_SERVER_*`)
//! - Secret resolution via the uniform `load_secret_env` contract
//!
//! # Usage
//!
//! ```ignore
//! use pagecraft_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}:{}", config.http.host, config.http.port);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use pagecraft_common_config::load_secret_env;
use tracing::{debug, info};

/// Secret names resolved at configuration load.
pub const LLM_API_KEY_SECRET: &str = "PAGECRAFT_SERVER_LLM_API_KEY";
pub const AUTH_API_KEY_SECRET: &str = "PAGECRAFT_SERVER_AUTH_API_KEY";
pub const STORAGE_ENDPOINT_SECRET: &str = "PAGECRAFT_SERVER_STORAGE_ENDPOINT";
pub const STORAGE_ACCESS_KEY_SECRET: &str = "PAGECRAFT_SERVER_STORAGE_ACCESS_KEY";
pub const STORAGE_SECRET_KEY_SECRET: &str = "PAGECRAFT_SERVER_STORAGE_SECRET_KEY";

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub cors: CorsConfig,
	pub logging: LoggingConfig,
	pub auth: AuthConfig,
	pub llm: LlmConfig,
	pub storage: StorageConfig,
	pub publish: PublishConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`PAGECRAFT_SERVER_*`)
/// 2. Config file (`/etc/pagecraft/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple
/// deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

fn load_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let cors = layer.cors.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let publish = layer.publish.unwrap_or_default().finalize();

	let llm_api_key = resolve_secret(LLM_API_KEY_SECRET)?;
	let llm = layer.llm.unwrap_or_default().finalize(llm_api_key);

	let auth_api_key = resolve_secret(AUTH_API_KEY_SECRET)?;
	let auth = layer.auth.unwrap_or_default().finalize(auth_api_key);

	let endpoint = resolve_secret(STORAGE_ENDPOINT_SECRET)?.map(|s| s.expose().to_string());
	let access_key = resolve_secret(STORAGE_ACCESS_KEY_SECRET)?;
	let secret_key = resolve_secret(STORAGE_SECRET_KEY_SECRET)?;
	let storage = layer
		.storage
		.unwrap_or_default()
		.finalize(endpoint, access_key, secret_key);

	validate_config(&auth, &storage)?;

	info!(
		host = %http.host,
		port = http.port,
		llm_model = %llm.model,
		llm_key_configured = llm.api_key.is_some(),
		auth_enabled = auth.enabled,
		storage_configured = storage.is_configured(),
		bucket = %storage.bucket,
		log_format = ?logging.format,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		cors,
		logging,
		auth,
		llm,
		storage,
		publish,
	})
}

fn resolve_secret(
	name: &str,
) -> Result<Option<pagecraft_common_config::SecretString>, ConfigError> {
	load_secret_env(name).map_err(|e| ConfigError::Secret(e.to_string()))
}

/// Validate cross-field configuration rules.
fn validate_config(auth: &AuthConfig, storage: &StorageConfig) -> Result<(), ConfigError> {
	if auth.enabled && auth.api_key.is_none() {
		return Err(ConfigError::Validation(format!(
			"PAGECRAFT_SERVER_AUTH_ENABLED is set but no verifier key is configured. \
			 Set {AUTH_API_KEY_SECRET} or {AUTH_API_KEY_SECRET}_FILE."
		)));
	}

	let creds_present = [
		storage.endpoint.is_some(),
		storage.access_key.is_some(),
		storage.secret_key.is_some(),
	];
	if creds_present.iter().any(|p| *p) && !creds_present.iter().all(|p| *p) {
		return Err(ConfigError::Validation(format!(
			"storage credentials are partially configured; set all of \
			 {STORAGE_ENDPOINT_SECRET}, {STORAGE_ACCESS_KEY_SECRET}, and \
			 {STORAGE_SECRET_KEY_SECRET}, or none"
		)));
	}

	Ok(())
}
