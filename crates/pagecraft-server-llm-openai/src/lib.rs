// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! OpenAI completion client for the Pagecraft content generator.
//!
//! The generate-content endpoint forwards a caller description plus an
//! instruction template to the chat-completions API and returns the model's
//! raw text. One synchronous request per call; no retries, no streaming.

mod client;
mod error;
mod types;

pub use client::OpenAIClient;
pub use error::LlmError;
pub use types::{OpenAIConfig, OpenAIMessage, OpenAIRequest, OpenAIResponse};
