// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake connectivity monitor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BridgeMonitor, Connectivity, ConnectivityMonitor};
use tokio::sync::watch;

/// Fake connectivity monitor with convenience transitions
#[derive(Clone, Default)]
pub struct FakeMonitor {
    inner: BridgeMonitor,
}

impl FakeMonitor {
    /// Starts offline, like a device booting without signal
    pub fn new() -> Self {
        Self::default()
    }

    pub fn online() -> Self {
        let monitor = Self::new();
        monitor.go_online();
        monitor
    }

    pub fn set(&self, state: Connectivity) {
        self.inner.publish(state);
    }

    pub fn go_online(&self) {
        self.inner.publish(Connectivity::online());
    }

    pub fn go_offline(&self) {
        self.inner.publish(Connectivity::offline());
    }
}

impl ConnectivityMonitor for FakeMonitor {
    fn snapshot(&self) -> Connectivity {
        self.inner.snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.inner.subscribe()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
