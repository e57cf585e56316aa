// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity-driven queue consumer.
//!
//! Owns the app's handler registry and runs a processing pass whenever
//! the platform reports the device online. The watch subscription only
//! ever holds the latest state, so a burst of transitions while a pass
//! runs collapses into one follow-up pass.

use crate::handler::HandlerRegistry;
use crate::queue::ActionQueue;
use curb_adapters::ConnectivityMonitor;
use curb_core::{Clock, IdGen, SystemClock, UuidIdGen};
use curb_storage::DurableStore;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Drives [`ActionQueue::process`] from connectivity transitions.
pub struct SyncConsumer<S, C, G = UuidIdGen, K = SystemClock> {
    queue: Arc<ActionQueue<S, C, G, K>>,
    monitor: C,
    handlers: HandlerRegistry,
}

impl<S, C, G, K> SyncConsumer<S, C, G, K>
where
    S: DurableStore,
    C: ConnectivityMonitor,
    G: IdGen,
    K: Clock,
{
    pub fn new(queue: Arc<ActionQueue<S, C, G, K>>, monitor: C, handlers: HandlerRegistry) -> Self {
        Self {
            queue,
            monitor,
            handlers,
        }
    }

    /// Process once if already online, then follow connectivity
    /// transitions until `shutdown` flips or the platform bridge goes
    /// away.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut net = self.monitor.subscribe();

        // Anything left over from the previous app run
        self.drain().await;

        loop {
            tokio::select! {
                changed = net.changed() => {
                    if changed.is_err() {
                        debug!("connectivity bridge closed, stopping consumer");
                        break;
                    }
                    self.drain().await;
                }
                _ = shutdown.changed() => break,
            }
        }
    }

    /// One opportunistic pass. Offline states and errors are logged,
    /// never surfaced: the queue retries on the next transition.
    async fn drain(&self) {
        if !self.monitor.snapshot().is_online() {
            return;
        }
        if let Err(err) = self.queue.process(&self.handlers).await {
            warn!(error = %err, "offline queue pass failed");
        }
    }
}

#[cfg(test)]
#[path = "consumer_tests.rs"]
mod tests;
