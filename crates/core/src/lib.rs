// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! curb-core: Core types for the Curbside offline sync layer

pub mod action;
pub mod clock;
pub mod id;

pub use action::{ActionId, QueuedAction};
pub use clock::{Clock, SystemClock};
pub use id::{IdGen, UuidIdGen};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
#[cfg(any(test, feature = "test-support"))]
pub use id::SequentialIdGen;
