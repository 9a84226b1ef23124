// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Per-identifier mutual exclusion.
//!
//! Two publishes for the same identifier would race on the same local
//! output directory and storage key, so the build-to-ACL sequence holds a
//! keyed lock for its whole duration. Distinct identifiers are unaffected.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lock table keyed by identifier.
#[derive(Default)]
pub struct KeyedLocks {
	inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Acquire the lock for `key`, waiting for any in-flight holder.
	pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
		let entry = {
			let mut map = self.inner.lock().await;
			// Entries nobody holds or waits on have only the map's Arc.
			map.retain(|_, lock| Arc::strong_count(lock) > 1);
			Arc::clone(map.entry(key.to_string()).or_default())
		};
		entry.lock_owned().await
	}

	#[cfg(test)]
	async fn tracked_keys(&self) -> usize {
		self.inner.lock().await.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;
	use tokio::time::timeout;

	#[tokio::test]
	async fn test_same_key_is_exclusive() {
		let locks = KeyedLocks::new();
		let guard = locks.acquire("u-1").await;

		let blocked = timeout(Duration::from_millis(20), locks.acquire("u-1")).await;
		assert!(blocked.is_err(), "second acquire should block");

		drop(guard);
		let reacquired = timeout(Duration::from_millis(20), locks.acquire("u-1")).await;
		assert!(reacquired.is_ok(), "lock should be free after release");
	}

	#[tokio::test]
	async fn test_distinct_keys_are_independent() {
		let locks = KeyedLocks::new();
		let _a = locks.acquire("u-1").await;

		let b = timeout(Duration::from_millis(20), locks.acquire("u-2")).await;
		assert!(b.is_ok(), "distinct key must not block");
	}

	#[tokio::test]
	async fn test_released_entries_are_dropped() {
		let locks = KeyedLocks::new();
		{
			let _a = locks.acquire("u-1").await;
			let _b = locks.acquire("u-2").await;
		}
		// Next acquire sweeps entries with no holders.
		let _c = locks.acquire("u-3").await;
		assert_eq!(locks.tracked_keys().await, 1);
	}
}
