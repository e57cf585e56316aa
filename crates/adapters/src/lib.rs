// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Platform adapters for the Curbside offline sync core

pub mod net;

pub use net::{BridgeMonitor, Connectivity, ConnectivityMonitor};

#[cfg(any(test, feature = "test-support"))]
pub use net::FakeMonitor;
