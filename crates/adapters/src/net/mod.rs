// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Network reachability adapters

mod bridge;
mod state;

pub use bridge::BridgeMonitor;
pub use state::Connectivity;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMonitor;

use tokio::sync::watch;

/// Adapter surfacing connectivity state from the platform.
///
/// `subscribe` returns a watch receiver: subscribers always observe
/// the latest state, and bursts of transitions coalesce.
pub trait ConnectivityMonitor: Clone + Send + Sync + 'static {
    /// Current connectivity state
    fn snapshot(&self) -> Connectivity;

    /// Subscribe to state changes
    fn subscribe(&self) -> watch::Receiver<Connectivity>;
}
