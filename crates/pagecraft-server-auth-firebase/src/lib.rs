// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Firebase ID-token verification for Pagecraft.
//!
//! Bearer tokens are verified against the Google Identity Toolkit
//! `accounts:lookup` endpoint: the provider either resolves the token to an
//! account (yielding [`TokenClaims`]) or rejects it. Verification is
//! delegated entirely to the provider; no key material or JWT parsing lives
//! in this process.

use std::time::Duration;

use async_trait::async_trait;
use pagecraft_common_secret::SecretString;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Time budget for one verification round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Firebase verifier.
#[derive(Debug, Clone)]
pub struct FirebaseAuthConfig {
	pub api_key: SecretString,
	pub base_url: String,
}

impl FirebaseAuthConfig {
	pub fn new(api_key: SecretString) -> Self {
		Self {
			api_key,
			base_url: "https://identitytoolkit.googleapis.com/v1".to_string(),
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}
}

/// Identity claims extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
	pub user_id: String,
	pub email: Option<String>,
}

/// Errors from token verification.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	#[error("invalid identity provider base URL: {0}")]
	InvalidBaseUrl(#[from] url::ParseError),

	/// Transport-level failure reaching the identity provider.
	#[error("identity provider request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// The provider rejected the token.
	#[error("token rejected: {0}")]
	Rejected(String),

	/// The provider answered 200 with an unusable body.
	#[error("identity provider returned a malformed response")]
	MalformedResponse,
}

/// Seam between the HTTP layer and the identity provider, so handlers can
/// be exercised with a fake verifier.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
	async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Verifier backed by the Identity Toolkit REST API.
pub struct FirebaseAuthClient {
	config: FirebaseAuthConfig,
	http: Client,
}

impl FirebaseAuthClient {
	pub fn new(config: FirebaseAuthConfig) -> Self {
		let http = pagecraft_common_http::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.expect("failed to build HTTP client");
		Self { config, http }
	}

	fn lookup_url(&self) -> Result<Url, AuthError> {
		let mut url = Url::parse(&format!(
			"{}/accounts:lookup",
			self.config.base_url.trim_end_matches('/')
		))?;
		url.query_pairs_mut()
			.append_pair("key", self.config.api_key.expose());
		Ok(url)
	}
}

#[async_trait]
impl TokenVerifier for FirebaseAuthClient {
	async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
		let url = self.lookup_url()?;

		let response = self
			.http
			.post(url)
			.json(&LookupRequest { id_token: token })
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			let message = serde_json::from_str::<ProviderErrorBody>(&body)
				.map(|b| b.error.message)
				.unwrap_or_else(|_| format!("verification failed with status {status}"));
			tracing::warn!(status = %status, "identity provider rejected token");
			return Err(AuthError::Rejected(message));
		}

		let lookup: LookupResponse = response.json().await?;
		let user = lookup
			.users
			.and_then(|users| users.into_iter().next())
			.ok_or(AuthError::MalformedResponse)?;

		if user.disabled {
			return Err(AuthError::Rejected("account is disabled".to_string()));
		}

		tracing::debug!(user_id = %user.local_id, "token verified");
		Ok(TokenClaims {
			user_id: user.local_id,
			email: user.email,
		})
	}
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
	id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
	users: Option<Vec<LookupUser>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
	local_id: String,
	email: Option<String>,
	#[serde(default)]
	disabled: bool,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
	error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
	message: String,
}
