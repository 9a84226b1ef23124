// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Pagecraft.
//!
//! This crate provides a pre-configured HTTP client with a consistent
//! User-Agent header. Every outbound call (LLM API, identity provider,
//! object store) goes through a client built here.

mod client;

pub use client::{builder, new_client, new_client_with_timeout, user_agent};
