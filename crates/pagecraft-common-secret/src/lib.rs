// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret wrapper type that prevents accidental logging of sensitive values.
//!
//! [`Secret<T>`] redacts its contents in `Debug`, `Display`, and `Serialize`
//! output and zeroizes the inner value on drop. Access to the wrapped value
//! is always explicit via [`Secret::expose`], so a leak requires a visible
//! call at the leak site.

use std::fmt;

use zeroize::Zeroize;

/// Placeholder emitted wherever a secret would otherwise be printed.
pub const REDACTED: &str = "[REDACTED]";

/// Wrapper around a sensitive value.
///
/// The inner value is zeroized when the wrapper is dropped.
pub struct Secret<T: Zeroize> {
	inner: T,
}

/// A secret string value (API keys, tokens, credentials).
pub type SecretString = Secret<String>;

impl<T: Zeroize> Secret<T> {
	/// Wrap a sensitive value.
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Access the wrapped value.
	///
	/// Callers must not pass the returned reference to logging or
	/// serialization code.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl<T: Zeroize> Drop for Secret<T> {
	fn drop(&mut self) {
		self.inner.zeroize();
	}
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T: Zeroize> fmt::Display for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T: Zeroize + PartialEq> PartialEq for Secret<T> {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T: Zeroize + Eq> Eq for Secret<T> {}

#[cfg(feature = "serde")]
impl<T: Zeroize> serde::Serialize for Secret<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		// Secrets never round-trip through serialization.
		serializer.serialize_str(REDACTED)
	}
}

#[cfg(feature = "serde")]
impl<'de, T: Zeroize + serde::Deserialize<'de>> serde::Deserialize<'de> for Secret<T> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		T::deserialize(deserializer).map(Secret::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_expose_returns_inner_value() {
		let secret = SecretString::new("sk-abc123".to_string());
		assert_eq!(secret.expose(), "sk-abc123");
	}

	#[test]
	fn test_debug_is_redacted() {
		let secret = SecretString::new("sk-abc123".to_string());
		assert_eq!(format!("{:?}", secret), REDACTED);
	}

	#[test]
	fn test_display_is_redacted() {
		let secret = SecretString::new("sk-abc123".to_string());
		assert_eq!(format!("{}", secret), REDACTED);
	}

	#[test]
	fn test_clone_preserves_value() {
		let secret = SecretString::new("token".to_string());
		let cloned = secret.clone();
		assert_eq!(secret, cloned);
	}

	#[test]
	fn test_eq_compares_inner_values() {
		let a = SecretString::new("same".to_string());
		let b = SecretString::new("same".to_string());
		let c = SecretString::new("different".to_string());
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[cfg(feature = "serde")]
	#[test]
	fn test_serialize_is_redacted() {
		let secret = SecretString::new("sk-abc123".to_string());
		let json = serde_json::to_string(&secret).unwrap();
		assert_eq!(json, format!("\"{}\"", REDACTED));
	}

	#[cfg(feature = "serde")]
	#[test]
	fn test_deserialize_reads_plain_value() {
		let secret: SecretString = serde_json::from_str("\"sk-abc123\"").unwrap();
		assert_eq!(secret.expose(), "sk-abc123");
	}
}
