// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the sync engine

use curb_storage::StoreError;
use thiserror::Error;

/// Errors that can occur in queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("queue encoding error: {0}")]
    Codec(#[from] serde_json::Error),
}
