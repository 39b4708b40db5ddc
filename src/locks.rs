// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Keyed async mutexes for serializing read-check-write sequences.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per key, created on first use and shared across clones.
/// An entry lives only while some caller holds or waits on it.
///
/// Only serializes callers within this process. Cross-instance races are
/// handled by the storage layer (Firestore transactions).
#[derive(Clone, Default)]
pub struct KeyedLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`. Released when the guard drops.
    pub async fn lock(&self, key: &str) -> KeyedGuard {
        let lock = self
            .inner
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        KeyedGuard {
            guard: Some(lock.lock_owned().await),
            key: key.to_string(),
            inner: self.inner.clone(),
        }
    }
}

/// Exclusive access to one key of a [`KeyedLocks`].
pub struct KeyedGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Drop for KeyedGuard {
    fn drop(&mut self) {
        // Unlock first so our own Arc is gone from the count.
        self.guard.take();
        // remove_if holds the shard lock, so no caller can clone the entry
        // between the count check and the removal.
        self.inner
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
