// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The offline action queue.
//!
//! Pending write operations live as a single JSON slot in the durable
//! store and are replayed in FIFO order once the device is online.
//! Every operation re-reads and re-writes the slot: there is no
//! in-memory cache, so a crash mid-pass loses at most the in-flight
//! action's retry increment, never the rest of the queue.

use crate::dead_letter::{self, DeadLetter, DropReason};
use crate::error::QueueError;
use crate::handler::{ActionHandler, HandlerError, HandlerRegistry};
use curb_adapters::ConnectivityMonitor;
use curb_core::{ActionId, Clock, IdGen, QueuedAction, SystemClock, UuidIdGen};
use curb_storage::{slot, DurableStore};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Default slot name in the durable store
pub const DEFAULT_SLOT: &str = "offline_queue";

/// Suffix of the dead-letter slot, appended to the queue's slot name
const DEAD_SUFFIX: &str = ".dead";

/// Tunables for queue processing
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Failed deliveries allowed before an action is dropped
    pub max_retries: u32,
    /// Upper bound on a single delivery attempt; `None` disables it
    pub handler_timeout: Option<Duration>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            handler_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Aggregate result of one processing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Durable FIFO queue of pending write operations.
///
/// One logical queue owns one store slot; all access to that slot goes
/// through this type. Share it with `Arc` — every operation takes
/// `&self`.
pub struct ActionQueue<S, C, G = UuidIdGen, K = SystemClock> {
    store: S,
    monitor: C,
    slot_key: String,
    config: QueueConfig,
    id_gen: G,
    clock: K,
    /// Serializes processing passes; see [`ActionQueue::process`]
    flight: Mutex<()>,
}

impl<S: DurableStore, C: ConnectivityMonitor> ActionQueue<S, C> {
    pub fn new(store: S, monitor: C) -> Self {
        Self::with_config(store, monitor, QueueConfig::default())
    }

    pub fn with_config(store: S, monitor: C, config: QueueConfig) -> Self {
        Self::assemble(store, monitor, DEFAULT_SLOT, config, UuidIdGen, SystemClock)
    }
}

impl<S, C, G, K> ActionQueue<S, C, G, K>
where
    S: DurableStore,
    C: ConnectivityMonitor,
    G: IdGen,
    K: Clock,
{
    /// Full constructor for callers that need their own slot name,
    /// ID source, or clock (mostly tests).
    pub fn assemble(
        store: S,
        monitor: C,
        slot_key: impl Into<String>,
        config: QueueConfig,
        id_gen: G,
        clock: K,
    ) -> Self {
        Self {
            store,
            monitor,
            slot_key: slot_key.into(),
            config,
            id_gen,
            clock,
            flight: Mutex::new(()),
        }
    }

    /// Append a new action and persist the updated list.
    pub async fn enqueue(
        &self,
        kind: impl Into<String>,
        payload: serde_json::Value,
    ) -> Result<ActionId, QueueError> {
        let action = QueuedAction {
            id: ActionId::new(self.id_gen.next()),
            kind: kind.into(),
            payload,
            enqueued_at_epoch_ms: self.clock.now_epoch_ms(),
            retry_count: 0,
        };
        let id = action.id.clone();

        let mut actions = self.load().await?;
        actions.push(action);
        self.save(&actions).await?;

        debug!(id = %id, "enqueued offline action");
        Ok(id)
    }

    /// All pending actions, in enqueue order.
    pub async fn list(&self) -> Result<Vec<QueuedAction>, QueueError> {
        self.load().await
    }

    /// Cancel a pending action; no-op if it is not in the queue.
    pub async fn remove(&self, id: &ActionId) -> Result<(), QueueError> {
        let mut actions = self.load().await?;
        let before = actions.len();
        actions.retain(|a| a.id != *id);
        if actions.len() != before {
            self.save(&actions).await?;
        }
        Ok(())
    }

    /// Discard all pending actions. Irreversible; used on logout and reset.
    pub async fn clear(&self) -> Result<(), QueueError> {
        self.store.remove(&self.slot_key).await?;
        Ok(())
    }

    /// Dropped actions retained for inspection, oldest first.
    pub async fn dead_letters(&self) -> Result<Vec<DeadLetter>, QueueError> {
        match self.store.get(&self.dead_key()).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Discard the dead-letter records.
    pub async fn clear_dead_letters(&self) -> Result<(), QueueError> {
        self.store.remove(&self.dead_key()).await?;
        Ok(())
    }

    /// Attempt delivery of every pending action, in FIFO order.
    ///
    /// Passes are serialized: a concurrent caller waits for the active
    /// pass to finish, then runs against the freshly persisted state.
    /// Offline, the pass is a no-op so failure accounting stays honest.
    /// Delivery is sequential, never parallel — a reconnect must not
    /// burst the backend.
    pub async fn process(&self, handlers: &HandlerRegistry) -> Result<ProcessReport, QueueError> {
        let _flight = self.flight.lock().await;

        if !self.monitor.snapshot().is_online() {
            return Ok(ProcessReport::default());
        }

        // Snapshot at pass start; actions enqueued mid-pass wait for
        // the next pass.
        let snapshot = self.load().await?;
        let mut report = ProcessReport::default();

        for action in snapshot {
            let Some(handler) = handlers.get(&action.kind) else {
                // Stale kind from an app upgrade; dropping beats
                // blocking the queue forever. Counted in neither bucket.
                warn!(id = %action.id, kind = %action.kind, "no handler for queued action, dropping");
                self.remove_persisted(&action.id).await?;
                self.record_drop(action, DropReason::Unroutable).await?;
                continue;
            };

            match self.deliver(handler.as_ref(), &action).await {
                Ok(()) => {
                    self.remove_persisted(&action.id).await?;
                    report.succeeded += 1;
                    debug!(id = %action.id, kind = %action.kind, "delivered offline action");
                }
                Err(err) => {
                    // Re-read before writing back: removals earlier in
                    // this pass have already changed the persisted list.
                    let mut actions = self.load().await?;
                    let Some(pos) = actions.iter().position(|a| a.id == action.id) else {
                        // Cancelled out from under us; nothing to update
                        continue;
                    };

                    actions[pos].retry_count += 1;
                    let retries = actions[pos].retry_count;
                    if retries >= self.config.max_retries {
                        let dropped = actions.remove(pos);
                        self.save(&actions).await?;
                        warn!(
                            id = %dropped.id,
                            kind = %dropped.kind,
                            retries,
                            error = %err,
                            "delivery retries exhausted, dropping action"
                        );
                        self.record_drop(dropped, DropReason::RetriesExhausted)
                            .await?;
                        report.failed += 1;
                    } else {
                        self.save(&actions).await?;
                        debug!(id = %action.id, retries, error = %err, "delivery failed, will retry");
                    }
                }
            }
        }

        if report.succeeded > 0 || report.failed > 0 {
            info!(
                succeeded = report.succeeded,
                failed = report.failed,
                "offline queue pass complete"
            );
        }
        Ok(report)
    }

    async fn deliver(
        &self,
        handler: &dyn ActionHandler,
        action: &QueuedAction,
    ) -> Result<(), HandlerError> {
        match self.config.handler_timeout {
            Some(limit) => tokio::time::timeout(limit, handler.deliver(&action.payload))
                .await
                .unwrap_or(Err(HandlerError::TimedOut)),
            None => handler.deliver(&action.payload).await,
        }
    }

    async fn load(&self) -> Result<Vec<QueuedAction>, QueueError> {
        match self.store.get(&self.slot_key).await? {
            Some(raw) => Ok(slot::decode(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, actions: &[QueuedAction]) -> Result<(), QueueError> {
        let raw = slot::encode(actions)?;
        self.store.set(&self.slot_key, &raw).await?;
        Ok(())
    }

    async fn remove_persisted(&self, id: &ActionId) -> Result<(), QueueError> {
        let mut actions = self.load().await?;
        actions.retain(|a| a.id != *id);
        self.save(&actions).await?;
        Ok(())
    }

    fn dead_key(&self) -> String {
        format!("{}{}", self.slot_key, DEAD_SUFFIX)
    }

    async fn record_drop(
        &self,
        action: QueuedAction,
        reason: DropReason,
    ) -> Result<(), QueueError> {
        let mut letters = self.dead_letters().await?;
        dead_letter::push(
            &mut letters,
            DeadLetter {
                action,
                reason,
                dropped_at_epoch_ms: self.clock.now_epoch_ms(),
            },
        );
        let raw = serde_json::to_string(&letters)?;
        self.store.set(&self.dead_key(), &raw).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
