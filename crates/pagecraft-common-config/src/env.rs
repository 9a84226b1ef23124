// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret resolution from the process environment.
//!
//! Every secret is addressed by name through one contract:
//! [`load_secret_env`] resolves `NAME` directly, or reads the file named by
//! `NAME_FILE` (the usual container-secret mount pattern). The resolved
//! value is wrapped in [`SecretString`] immediately so it never travels as
//! a bare `String`.

use std::path::PathBuf;

use pagecraft_common_secret::SecretString;
use tracing::debug;

/// Errors from resolving a named secret.
#[derive(Debug, thiserror::Error)]
pub enum SecretEnvError {
	#[error("both {name} and {name}_FILE are set; remove one")]
	Ambiguous { name: String },

	#[error("failed to read secret file {path} for {name}: {source}")]
	FileRead {
		name: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Error from [`require_secret_env`].
#[derive(Debug, thiserror::Error)]
pub enum RequiredSecretError {
	#[error("required secret {name} is not set (set {name} or {name}_FILE)")]
	Missing { name: String },

	#[error(transparent)]
	Load(#[from] SecretEnvError),
}

/// Resolve a named secret from the environment.
///
/// Resolution order:
/// 1. `NAME` — the value itself
/// 2. `NAME_FILE` — path to a file holding the value (trailing newline
///    stripped)
///
/// Setting both is an error rather than a silent precedence choice. Empty
/// values are treated as unset.
pub fn load_secret_env(name: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let direct = non_empty_var(name);
	let file = non_empty_var(&format!("{name}_FILE"));

	match (direct, file) {
		(Some(_), Some(_)) => Err(SecretEnvError::Ambiguous {
			name: name.to_string(),
		}),
		(Some(value), None) => {
			debug!(secret = name, source = "env", "resolved secret");
			Ok(Some(SecretString::new(value)))
		}
		(None, Some(path)) => {
			let path = PathBuf::from(path);
			let contents =
				std::fs::read_to_string(&path).map_err(|source| SecretEnvError::FileRead {
					name: name.to_string(),
					path: path.clone(),
					source,
				})?;
			debug!(secret = name, source = "file", "resolved secret");
			let trimmed = contents.trim_end_matches(['\r', '\n']).to_string();
			Ok(Some(SecretString::new(trimmed)))
		}
		(None, None) => Ok(None),
	}
}

/// Resolve a named secret, failing if it is absent.
pub fn require_secret_env(name: &str) -> Result<SecretString, RequiredSecretError> {
	load_secret_env(name)?.ok_or_else(|| RequiredSecretError::Missing {
		name: name.to_string(),
	})
}

fn non_empty_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_load_from_env_var() {
		std::env::set_var("PAGECRAFT_TEST_SECRET_DIRECT", "hunter2");
		let secret = load_secret_env("PAGECRAFT_TEST_SECRET_DIRECT")
			.unwrap()
			.unwrap();
		assert_eq!(secret.expose(), "hunter2");
		std::env::remove_var("PAGECRAFT_TEST_SECRET_DIRECT");
	}

	#[test]
	fn test_load_from_file_strips_trailing_newline() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "file-secret").unwrap();
		std::env::set_var("PAGECRAFT_TEST_SECRET_FILEVAR_FILE", file.path());

		let secret = load_secret_env("PAGECRAFT_TEST_SECRET_FILEVAR")
			.unwrap()
			.unwrap();
		assert_eq!(secret.expose(), "file-secret");
		std::env::remove_var("PAGECRAFT_TEST_SECRET_FILEVAR_FILE");
	}

	#[test]
	fn test_unset_resolves_to_none() {
		assert!(load_secret_env("PAGECRAFT_TEST_SECRET_UNSET")
			.unwrap()
			.is_none());
	}

	#[test]
	fn test_empty_value_treated_as_unset() {
		std::env::set_var("PAGECRAFT_TEST_SECRET_EMPTY", "");
		assert!(load_secret_env("PAGECRAFT_TEST_SECRET_EMPTY")
			.unwrap()
			.is_none());
		std::env::remove_var("PAGECRAFT_TEST_SECRET_EMPTY");
	}

	#[test]
	fn test_both_set_is_ambiguous() {
		std::env::set_var("PAGECRAFT_TEST_SECRET_BOTH", "a");
		std::env::set_var("PAGECRAFT_TEST_SECRET_BOTH_FILE", "/nonexistent");
		let err = load_secret_env("PAGECRAFT_TEST_SECRET_BOTH").unwrap_err();
		assert!(matches!(err, SecretEnvError::Ambiguous { .. }));
		std::env::remove_var("PAGECRAFT_TEST_SECRET_BOTH");
		std::env::remove_var("PAGECRAFT_TEST_SECRET_BOTH_FILE");
	}

	#[test]
	fn test_missing_file_is_an_error() {
		std::env::set_var(
			"PAGECRAFT_TEST_SECRET_NOFILE_FILE",
			"/nonexistent/secret/path",
		);
		let err = load_secret_env("PAGECRAFT_TEST_SECRET_NOFILE").unwrap_err();
		assert!(matches!(err, SecretEnvError::FileRead { .. }));
		std::env::remove_var("PAGECRAFT_TEST_SECRET_NOFILE_FILE");
	}

	#[test]
	fn test_require_missing_secret_fails() {
		let err = require_secret_env("PAGECRAFT_TEST_SECRET_REQUIRED").unwrap_err();
		assert!(matches!(err, RequiredSecretError::Missing { .. }));
		assert!(err.to_string().contains("PAGECRAFT_TEST_SECRET_REQUIRED"));
	}
}
