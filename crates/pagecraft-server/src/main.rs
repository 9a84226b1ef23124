// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Pagecraft server binary.

use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use pagecraft_server::{create_app_state, create_router};
use pagecraft_server_config::LogFormat;
use tower_http::{
	cors::{AllowOrigin, Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// Pagecraft server - content generation and website publishing.
#[derive(Parser, Debug)]
#[command(
	name = "pagecraft-server",
	about = "Pagecraft content generation and publishing server",
	version
)]
struct Args {
	/// Subcommands for pagecraft-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Parse CLI arguments
	let args = Args::parse();

	// Handle subcommands that should not start the server
	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Load configuration
	let config = pagecraft_server_config::load_config()?;

	// Setup tracing; JSON output matches the structured logging the
	// deployment's log pipeline ingests.
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| config.logging.level.clone().into());
	match config.logging.format {
		LogFormat::Json => tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer().json())
			.init(),
		LogFormat::Text => tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer())
			.init(),
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		auth_enabled = config.auth.enabled,
		bucket = %config.storage.bucket,
		"starting pagecraft-server"
	);

	// Construct clients once from configuration and inject them
	let state = create_app_state(&config)?;

	let cors = if config.cors.allowed_origins.iter().any(|o| o == "*") {
		CorsLayer::new()
			.allow_origin(Any)
			.allow_methods(Any)
			.allow_headers(Any)
	} else {
		let origins: Vec<HeaderValue> = config
			.cors
			.allowed_origins
			.iter()
			.filter_map(|origin| origin.parse().ok())
			.collect();
		CorsLayer::new()
			.allow_origin(AllowOrigin::list(origins))
			.allow_methods(Any)
			.allow_headers(Any)
	};

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(cors);

	// Start server
	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	// Run server with graceful shutdown
	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
