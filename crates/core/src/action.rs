// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queued offline actions and their persisted wire format.

use serde::{Deserialize, Serialize};

/// Unique identifier for a queued action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ActionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A pending write operation waiting for delivery to the backend.
///
/// The serialized field names (`type`, `timestamp`, `retryCount`) are
/// the queue format shipped in earlier app versions; lists written by
/// old clients may omit `retryCount` and may carry extra fields, both
/// of which must decode cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedAction {
    pub id: ActionId,
    /// Tag selecting the delivery handler
    #[serde(rename = "type")]
    pub kind: String,
    /// Handler-specific data, stored and passed through unmodified
    pub payload: serde_json::Value,
    /// When the action was enqueued; informational, list order is authoritative
    #[serde(rename = "timestamp")]
    pub enqueued_at_epoch_ms: u64,
    /// Delivery attempts so far
    #[serde(rename = "retryCount", default)]
    pub retry_count: u32,
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
