// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! curb-sync: the offline mutation queue and synchronization engine.
//!
//! Pending write operations (extend a parking session, start one, ...)
//! are enqueued while the device is offline, persisted through a
//! [`curb_storage::DurableStore`], and replayed in FIFO order with
//! bounded retry once connectivity returns.

mod consumer;
mod dead_letter;
mod error;
mod handler;
mod queue;

pub use consumer::SyncConsumer;
pub use dead_letter::{DeadLetter, DropReason, MAX_DEAD_LETTERS};
pub use error::QueueError;
pub use handler::{ActionHandler, HandlerError, HandlerRegistry};
pub use queue::{ActionQueue, ProcessReport, QueueConfig, DEFAULT_SLOT};
