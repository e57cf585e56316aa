// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key-value store contract.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from durable store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Durable key-value store for serialized app state.
///
/// Each call is atomic on its own; nothing is transactional across
/// calls. Failures propagate to the caller unchanged.
#[async_trait]
pub trait DurableStore: Clone + Send + Sync + 'static {
    /// Read the blob stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous blob
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the blob under `key`; no-op if absent
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
