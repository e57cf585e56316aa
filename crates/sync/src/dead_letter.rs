// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dead-letter records for dropped actions.
//!
//! The legacy queue lost exhausted and unroutable actions silently.
//! Drops now land in a bounded side slot next to the queue so support
//! and diagnostics screens can surface them.

use curb_core::QueuedAction;
use serde::{Deserialize, Serialize};

/// Most recent drops kept per queue; older records rotate out
pub const MAX_DEAD_LETTERS: usize = 100;

/// Why an action was dropped from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// No handler registered for the action's kind
    Unroutable,
    /// Delivery failed `max_retries` times
    RetriesExhausted,
}

/// A dropped action, its reason, and when it was dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadLetter {
    pub action: QueuedAction,
    pub reason: DropReason,
    pub dropped_at_epoch_ms: u64,
}

/// Append a record, rotating out the oldest past the cap.
pub(crate) fn push(letters: &mut Vec<DeadLetter>, letter: DeadLetter) {
    letters.push(letter);
    if letters.len() > MAX_DEAD_LETTERS {
        let excess = letters.len() - MAX_DEAD_LETTERS;
        letters.drain(..excess);
    }
}

#[cfg(test)]
#[path = "dead_letter_tests.rs"]
mod tests;
