// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitor fed by the platform bridge.
//!
//! The host app pushes reachability transitions into [`BridgeMonitor::publish`];
//! the sync layer reads snapshots and subscribes for changes. Publishing
//! an unchanged state does not wake subscribers.

use super::{Connectivity, ConnectivityMonitor};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Production connectivity monitor backed by a watch channel
#[derive(Clone)]
pub struct BridgeMonitor {
    tx: Arc<watch::Sender<Connectivity>>,
}

impl BridgeMonitor {
    /// Starts offline; the platform reports the real state shortly after boot.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Connectivity::default());
        Self { tx: Arc::new(tx) }
    }

    /// Record a state reported by the platform, notifying subscribers
    /// only on an actual transition.
    pub fn publish(&self, state: Connectivity) {
        self.tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            debug!(?state, "connectivity transition");
            *current = state;
            true
        });
    }
}

impl Default for BridgeMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityMonitor for BridgeMonitor {
    fn snapshot(&self) -> Connectivity {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
