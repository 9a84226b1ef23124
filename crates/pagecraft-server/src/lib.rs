// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Pagecraft HTTP server.
//!
//! This crate provides the HTTP surface over the content generator and the
//! website publishing workflow: two POST endpoints, an optional bearer-auth
//! gate in front of them, and a health endpoint.

pub mod api;
pub mod api_docs;
pub mod auth_middleware;
pub mod error;
pub mod routes;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::{ErrorResponse, ServerError};
pub use pagecraft_server_config::ServerConfig;
