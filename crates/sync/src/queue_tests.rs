// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use curb_adapters::{Connectivity, FakeMonitor};
use curb_core::{ActionId, FakeClock, SequentialIdGen};
use curb_storage::MemoryStore;
use parking_lot::Mutex as SyncMutex;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type TestQueue = ActionQueue<MemoryStore, FakeMonitor, SequentialIdGen, FakeClock>;

fn queue_with(store: MemoryStore, monitor: FakeMonitor, config: QueueConfig) -> TestQueue {
    ActionQueue::assemble(
        store,
        monitor,
        DEFAULT_SLOT,
        config,
        SequentialIdGen::default(),
        FakeClock::new(1_000),
    )
}

fn online_queue() -> TestQueue {
    queue_with(MemoryStore::new(), FakeMonitor::online(), QueueConfig::default())
}

/// Registry with one handler that succeeds and counts invocations
fn ok_registry(kind: &str) -> (HandlerRegistry, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut registry = HandlerRegistry::new();
    registry.register_fn(kind, move |_| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    (registry, calls)
}

/// Registry with one handler that always fails
fn failing_registry(kind: &str) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register_fn(kind, |_| async {
        Err(HandlerError::Failed("backend unavailable".to_string()))
    });
    registry
}

#[tokio::test]
async fn enqueue_preserves_fifo_order_and_payloads() {
    let queue = online_queue();
    queue.enqueue("sync_start", json!({"zone": 41})).await.unwrap();
    queue
        .enqueue("sync_extend", json!({"sessionId": "abc", "minutes": 30}))
        .await
        .unwrap();
    queue.enqueue("sync_stop", json!({"sessionId": "abc"})).await.unwrap();

    let actions = queue.list().await.unwrap();
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].kind, "sync_start");
    assert_eq!(actions[1].kind, "sync_extend");
    assert_eq!(actions[2].kind, "sync_stop");
    assert_eq!(actions[1].payload, json!({"sessionId": "abc", "minutes": 30}));
    assert_eq!(actions[0].id.as_str(), "act-1");
    assert_eq!(actions[2].id.as_str(), "act-3");
    assert!(actions.iter().all(|a| a.retry_count == 0));
    assert!(actions.iter().all(|a| a.enqueued_at_epoch_ms == 1_000));
}

#[tokio::test]
async fn enqueue_propagates_store_errors() {
    let store = MemoryStore::new();
    let queue = queue_with(store.clone(), FakeMonitor::online(), QueueConfig::default());

    store.fail_next_write("disk full");
    let err = queue.enqueue("sync_start", json!({})).await.unwrap_err();
    assert!(matches!(err, QueueError::Store(_)));
    assert!(queue.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn successful_delivery_removes_action() {
    let queue = online_queue();
    let seen = Arc::new(SyncMutex::new(Vec::new()));
    let sink = seen.clone();

    let mut registry = HandlerRegistry::new();
    registry.register_fn("sync_extend", move |payload| {
        let sink = sink.clone();
        async move {
            sink.lock().push(payload);
            Ok(())
        }
    });

    queue
        .enqueue("sync_extend", json!({"sessionId": "abc", "minutes": 30}))
        .await
        .unwrap();
    assert_eq!(queue.list().await.unwrap().len(), 1);

    let report = queue.process(&registry).await.unwrap();
    assert_eq!(report, ProcessReport { succeeded: 1, failed: 0 });
    assert!(queue.list().await.unwrap().is_empty());
    assert_eq!(*seen.lock(), vec![json!({"sessionId": "abc", "minutes": 30})]);
}

#[tokio::test]
async fn failing_handler_retries_then_drops() {
    let queue = online_queue();
    let registry = failing_registry("sync_extend");

    queue.enqueue("sync_extend", json!({"minutes": 30})).await.unwrap();

    // Two passes increment retries but keep the action
    for expected_retries in [1, 2] {
        let report = queue.process(&registry).await.unwrap();
        assert_eq!(report, ProcessReport { succeeded: 0, failed: 0 });
        let actions = queue.list().await.unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].retry_count, expected_retries);
    }

    // Third pass exhausts max_retries = 3
    let report = queue.process(&registry).await.unwrap();
    assert_eq!(report, ProcessReport { succeeded: 0, failed: 1 });
    assert!(queue.list().await.unwrap().is_empty());

    let letters = queue.dead_letters().await.unwrap();
    assert_eq!(letters.len(), 1);
    assert_eq!(letters[0].reason, DropReason::RetriesExhausted);
    assert_eq!(letters[0].action.retry_count, 3);
}

#[yare::parameterized(
    disconnected      = { false, Some(true)  },
    known_unreachable = { true,  Some(false) },
    fully_offline     = { false, Some(false) },
)]
#[test_macro(tokio::test)]
async fn offline_process_is_a_noop(connected: bool, reachable: Option<bool>) {
    let monitor = FakeMonitor::new();
    monitor.set(Connectivity { connected, reachable });
    let queue = queue_with(MemoryStore::new(), monitor, QueueConfig::default());
    let (registry, calls) = ok_registry("sync_extend");

    queue.enqueue("sync_extend", json!({})).await.unwrap();

    let report = queue.process(&registry).await.unwrap();
    assert_eq!(report, ProcessReport::default());
    assert_eq!(queue.list().await.unwrap().len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_reachability_still_delivers() {
    let monitor = FakeMonitor::new();
    monitor.set(Connectivity { connected: true, reachable: None });
    let queue = queue_with(MemoryStore::new(), monitor, QueueConfig::default());
    let (registry, calls) = ok_registry("sync_extend");

    queue.enqueue("sync_extend", json!({})).await.unwrap();

    let report = queue.process(&registry).await.unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unregistered_kind_is_dropped_uncounted() {
    let queue = online_queue();
    queue.enqueue("renamed_in_v3", json!({"old": true})).await.unwrap();

    let report = queue.process(&HandlerRegistry::new()).await.unwrap();
    assert_eq!(report, ProcessReport::default());
    assert!(queue.list().await.unwrap().is_empty());

    let letters = queue.dead_letters().await.unwrap();
    assert_eq!(letters.len(), 1);
    assert_eq!(letters[0].reason, DropReason::Unroutable);
    assert_eq!(letters[0].action.kind, "renamed_in_v3");
}

#[tokio::test]
async fn mixed_pass_counts_each_action_independently() {
    let queue = online_queue();
    let (mut registry, calls) = ok_registry("sync_extend");
    registry.register_fn("sync_start", |_| async {
        Err(HandlerError::Failed("500".to_string()))
    });

    queue.enqueue("sync_extend", json!({})).await.unwrap();
    queue.enqueue("sync_start", json!({})).await.unwrap();
    queue.enqueue("dropped_kind", json!({})).await.unwrap();

    let report = queue.process(&registry).await.unwrap();
    assert_eq!(report, ProcessReport { succeeded: 1, failed: 0 });
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Only the failing action remains, with one retry recorded
    let actions = queue.list().await.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, "sync_start");
    assert_eq!(actions[0].retry_count, 1);
}

#[tokio::test]
async fn remove_cancels_a_pending_action() {
    let queue = online_queue();
    let first = queue.enqueue("sync_start", json!({})).await.unwrap();
    queue.enqueue("sync_extend", json!({})).await.unwrap();

    queue.remove(&first).await.unwrap();
    let actions = queue.list().await.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, "sync_extend");

    // Removing an unknown id is a no-op and skips the write
    queue.remove(&ActionId::from("no-such-id")).await.unwrap();
    assert_eq!(queue.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn clear_deletes_the_slot() {
    let store = MemoryStore::new();
    let queue = queue_with(store.clone(), FakeMonitor::online(), QueueConfig::default());

    queue.enqueue("sync_start", json!({})).await.unwrap();
    queue.clear().await.unwrap();

    assert!(queue.list().await.unwrap().is_empty());
    assert_eq!(store.blob(DEFAULT_SLOT), None);
}

#[tokio::test]
async fn retry_state_survives_a_restart() {
    let store = MemoryStore::new();
    let queue = queue_with(store.clone(), FakeMonitor::online(), QueueConfig::default());
    queue.enqueue("sync_extend", json!({})).await.unwrap();
    queue.process(&failing_registry("sync_extend")).await.unwrap();

    // New queue instance over the same store, as after an app restart
    let revived = queue_with(store, FakeMonitor::online(), QueueConfig::default());
    let actions = revived.list().await.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].retry_count, 1);
}

#[tokio::test]
async fn concurrent_passes_are_single_flight() {
    let queue = online_queue();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut registry = HandlerRegistry::new();
    registry.register_fn("sync_extend", move |_| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(())
        }
    });

    queue.enqueue("sync_extend", json!({})).await.unwrap();

    // The second pass waits for the first, then sees an empty list
    let (a, b) = tokio::join!(queue.process(&registry), queue.process(&registry));
    assert_eq!(a.unwrap().succeeded + b.unwrap().succeeded, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slow_handler_times_out_as_a_failure() {
    let config = QueueConfig {
        max_retries: 3,
        handler_timeout: Some(Duration::from_millis(10)),
    };
    let queue = queue_with(MemoryStore::new(), FakeMonitor::online(), config);

    let mut registry = HandlerRegistry::new();
    registry.register_fn("sync_extend", |_| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    });

    queue.enqueue("sync_extend", json!({})).await.unwrap();

    let report = queue.process(&registry).await.unwrap();
    assert_eq!(report, ProcessReport::default());
    let actions = queue.list().await.unwrap();
    assert_eq!(actions[0].retry_count, 1);
}

#[tokio::test]
async fn clear_dead_letters_empties_the_side_slot() {
    let queue = online_queue();
    queue.enqueue("unknown_kind", json!({})).await.unwrap();
    queue.process(&HandlerRegistry::new()).await.unwrap();
    assert_eq!(queue.dead_letters().await.unwrap().len(), 1);

    queue.clear_dead_letters().await.unwrap();
    assert!(queue.dead_letters().await.unwrap().is_empty());
}

#[tokio::test]
async fn legacy_slot_contents_are_processable() {
    let store = MemoryStore::new();
    store
        .set(
            DEFAULT_SLOT,
            r#"[{"id":"legacy-1","type":"sync_extend","payload":{"minutes":15},"timestamp":5,"appVersion":"2.1"}]"#,
        )
        .await
        .unwrap();

    let queue = queue_with(store, FakeMonitor::online(), QueueConfig::default());
    let actions = queue.list().await.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].retry_count, 0);

    let (registry, calls) = ok_registry("sync_extend");
    let report = queue.process(&registry).await.unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(queue.list().await.unwrap().is_empty());
}
