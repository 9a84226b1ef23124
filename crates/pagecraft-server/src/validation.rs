// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Identifier validation.
//!
//! The identifier is caller-supplied and becomes a filesystem path
//! component, a subprocess environment value, and a storage key, so it is
//! validated at the HTTP boundary before any of that happens.

use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").unwrap());

/// Maximum identifier length in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Validate a site identifier.
///
/// Identifiers must:
/// - Be between 1 and [`MAX_IDENTIFIER_LEN`] characters
/// - Start and end with a lowercase letter or digit
/// - Contain only lowercase letters, digits, and hyphens
pub fn validate_identifier(identifier: &str) -> bool {
	identifier.len() <= MAX_IDENTIFIER_LEN && IDENTIFIER_REGEX.is_match(identifier)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_accepts_plain_identifiers() {
		assert!(validate_identifier("u1"));
		assert!(validate_identifier("a"));
		assert!(validate_identifier("my-site-42"));
	}

	#[test]
	fn test_rejects_empty_and_overlong() {
		assert!(!validate_identifier(""));
		assert!(!validate_identifier(&"a".repeat(MAX_IDENTIFIER_LEN + 1)));
		assert!(validate_identifier(&"a".repeat(MAX_IDENTIFIER_LEN)));
	}

	#[test]
	fn test_rejects_path_traversal_shapes() {
		assert!(!validate_identifier(".."));
		assert!(!validate_identifier("../etc/passwd"));
		assert!(!validate_identifier("a/b"));
		assert!(!validate_identifier("a\\b"));
	}

	#[test]
	fn test_rejects_shell_metacharacters() {
		assert!(!validate_identifier("a;b"));
		assert!(!validate_identifier("a$(whoami)"));
		assert!(!validate_identifier("a b"));
	}

	#[test]
	fn test_rejects_uppercase_and_edge_hyphens() {
		assert!(!validate_identifier("MySite"));
		assert!(!validate_identifier("-site"));
		assert!(!validate_identifier("site-"));
	}
}

#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		#[test]
		fn prop_wellformed_identifiers_accepted(
			identifier in "[a-z0-9]([a-z0-9-]{0,30}[a-z0-9])?"
		) {
			prop_assert!(validate_identifier(&identifier));
		}

		#[test]
		fn prop_identifiers_with_separators_rejected(
			head in "[a-z0-9]{1,8}",
			sep in "[/\\\\. ;$]",
			tail in "[a-z0-9]{1,8}"
		) {
			let identifier = format!("{head}{sep}{tail}");
			prop_assert!(!validate_identifier(&identifier));
		}
	}
}
