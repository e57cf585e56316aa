// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::store::{DurableStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

struct MemoryState {
    blobs: HashMap<String, String>,
    fail_next_write: Option<String>,
    writes: u64,
}

/// In-memory durable store with write-failure injection
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryState {
                blobs: HashMap::new(),
                fail_next_write: None,
                writes: 0,
            })),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `set` call fail with a backend error
    pub fn fail_next_write(&self, message: impl Into<String>) {
        self.inner.lock().fail_next_write = Some(message.into());
    }

    /// Raw blob under `key`, bypassing the trait
    pub fn blob(&self, key: &str) -> Option<String> {
        self.inner.lock().blobs.get(key).cloned()
    }

    /// Number of successful `set` calls so far
    pub fn write_count(&self) -> u64 {
        self.inner.lock().writes
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().blobs.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        if let Some(message) = state.fail_next_write.take() {
            return Err(StoreError::Backend(message));
        }
        state.blobs.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.lock().blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
