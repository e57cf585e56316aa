// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire codec for the persisted action list.
//!
//! The queue slot holds a JSON array in the format the original app
//! shipped with: `[{id, type, payload, timestamp, retryCount}, ...]`.
//! Old clients may omit `retryCount` and newer ones may add fields;
//! both must keep decoding. An individually corrupt entry is skipped
//! with a warning rather than wedging the whole queue.

use curb_core::QueuedAction;
use tracing::warn;

/// Serialize the action list for the durable store.
pub fn encode(actions: &[QueuedAction]) -> Result<String, serde_json::Error> {
    serde_json::to_string(actions)
}

/// Parse a stored action list.
///
/// Fails only if the blob is not a JSON array; entries that don't
/// parse as actions are dropped.
pub fn decode(raw: &str) -> Result<Vec<QueuedAction>, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut actions = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<QueuedAction>(entry) {
            Ok(action) => actions.push(action),
            Err(e) => warn!(error = %e, "skipping unparseable queue entry"),
        }
    }
    Ok(actions)
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
