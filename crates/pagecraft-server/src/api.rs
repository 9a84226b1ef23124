// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::{middleware, Router};
use pagecraft_server_auth_firebase::{FirebaseAuthClient, FirebaseAuthConfig, TokenVerifier};
use pagecraft_server_config::{ConfigError, ServerConfig};
use pagecraft_server_llm_openai::{OpenAIClient, OpenAIConfig};
use pagecraft_server_publish::{
	CommandBuildInvoker, HttpArtifactUploader, PublishWorkflow, WorkflowConfig,
};
use pagecraft_server_storage::{S3Config, S3StorageClient};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{api_docs::ApiDoc, auth_middleware, routes};

/// Application state shared across handlers.
///
/// Every collaborator is constructed once at startup and injected here;
/// handlers never build clients of their own.
#[derive(Clone)]
pub struct AppState {
	pub llm: Arc<OpenAIClient>,
	pub publisher: Arc<PublishWorkflow>,
	/// Present when auth is enabled; `None` runs the open variant.
	pub verifier: Option<Arc<dyn TokenVerifier>>,
}

/// Creates the application state from resolved configuration.
pub fn create_app_state(config: &ServerConfig) -> Result<AppState, ConfigError> {
	let llm_api_key = config.llm.api_key.clone().ok_or_else(|| {
		ConfigError::Validation(
			"LLM API key not configured; set PAGECRAFT_SERVER_LLM_API_KEY".to_string(),
		)
	})?;
	let llm = Arc::new(OpenAIClient::new(
		OpenAIConfig::new(llm_api_key)
			.with_base_url(&config.llm.base_url)
			.with_model(&config.llm.model),
	));

	let endpoint = config.storage.endpoint.clone().ok_or_else(|| {
		ConfigError::Validation(
			"storage endpoint not configured; set PAGECRAFT_SERVER_STORAGE_ENDPOINT".to_string(),
		)
	})?;
	let access_key = config.storage.access_key.clone().ok_or_else(|| {
		ConfigError::Validation(
			"storage access key not configured; set PAGECRAFT_SERVER_STORAGE_ACCESS_KEY"
				.to_string(),
		)
	})?;
	let secret_key = config.storage.secret_key.clone().ok_or_else(|| {
		ConfigError::Validation(
			"storage secret key not configured; set PAGECRAFT_SERVER_STORAGE_SECRET_KEY"
				.to_string(),
		)
	})?;

	let store = S3StorageClient::new(S3Config {
		endpoint,
		bucket: config.storage.bucket.clone(),
		region: config.storage.region.clone(),
		access_key: access_key.expose().to_string(),
		secret_key,
	})
	.map_err(|e| ConfigError::Validation(e.to_string()))?;

	let invoker = CommandBuildInvoker::new(
		config.publish.build_program.clone(),
		config.publish.build_args.clone(),
		config.publish.project_dir.clone(),
		config.publish.build_env_var.clone(),
	);

	let uploader = HttpArtifactUploader::new(
		Duration::from_secs(config.publish.upload_connect_timeout_secs),
		Duration::from_secs(config.publish.upload_read_timeout_secs),
	);

	let publisher = Arc::new(PublishWorkflow::new(
		Arc::new(invoker),
		Arc::new(store),
		Arc::new(uploader),
		WorkflowConfig {
			output_root: config.publish.output_root.clone(),
			public_base_url: config.storage.public_base_url.clone(),
			signed_url_expiry: Duration::from_secs(config.storage.signed_url_expiry_secs),
		},
	));

	let verifier = if config.auth.enabled {
		let api_key = config.auth.api_key.clone().ok_or_else(|| {
			ConfigError::Validation(
				"auth enabled but no verifier key; set PAGECRAFT_SERVER_AUTH_API_KEY".to_string(),
			)
		})?;
		Some(Arc::new(FirebaseAuthClient::new(
			FirebaseAuthConfig::new(api_key).with_base_url(&config.auth.base_url),
		)) as Arc<dyn TokenVerifier>)
	} else {
		None
	};

	Ok(AppState {
		llm,
		publisher,
		verifier,
	})
}

/// Creates the router with all routes configured.
pub fn create_router(state: AppState) -> Router {
	let gated = Router::new()
		.route("/generate-content", post(routes::generate::generate_content))
		.route(
			"/publish-website/{identifier}",
			post(routes::publish::publish_website),
		)
		.route_layer(middleware::from_fn_with_state(
			state.clone(),
			auth_middleware::require_bearer,
		));

	Router::new()
		.merge(gated)
		.route("/health", get(routes::health::health_check))
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
		.with_state(state)
}
