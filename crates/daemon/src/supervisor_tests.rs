// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration as StdDuration;

use tokio_util::sync::CancellationToken;

use horae_core::{NodeId, Queue, QueueId, QueueStatus, QueueType, SimClock};
use horae_coordination::MemoryCoordinationClient;
use horae_parser::Window;
use horae_store::{EntityStore, MemoryEntityStore};

use super::*;
use crate::containment::new_live_queues;
use crate::queues_monitor::SupervisorEvent;

fn always_on_queue() -> Queue {
    Queue {
        id: QueueId::new(),
        name: "q".to_string(),
        queue_type: QueueType::Async,
        window_of_operation: "any time".to_string(),
        window: Window { always_on: true, ..Window::default() },
        should_drain: false,
        paths: Vec::new(),
        tags: Vec::new(),
        backpressure_action: None,
        backpressure_threshold: None,
        status: QueueStatus::Active,
        running: false,
    }
}

fn supervisor(store: Arc<MemoryEntityStore>, live: LiveQueues) -> Supervisor<MemoryEntityStore, MemoryCoordinationClient, SimClock> {
    Supervisor {
        store,
        coordination: Arc::new(MemoryCoordinationClient::new()),
        cluster: "default".to_string(),
        node_id: NodeId::new(),
        api_uri: "http://node:7117".to_string(),
        http: reqwest::Client::new(),
        clock: SimClock::at(chrono::Utc::now()),
        live,
    }
}

#[tokio::test(start_paused = true)]
async fn startup_spawns_a_manager_for_every_active_queue() {
    let queue = always_on_queue();
    let queue_id = queue.id;
    let store = Arc::new(MemoryEntityStore::new());
    store.put_queue(queue).await;
    let live = new_live_queues();
    let sup = supervisor(store, live.clone());

    let (_tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(async move { sup.run(rx, run_cancel).await });

    tokio::time::advance(StdDuration::from_secs(60)).await;
    tokio::task::yield_now().await;
    assert!(live.lock().contains_key(&queue_id));

    cancel.cancel();
    let _ = handle.await;
}

#[tokio::test(start_paused = true)]
async fn created_event_spawns_a_manager_for_a_new_queue() {
    let queue = always_on_queue();
    let queue_id = queue.id;
    let store = Arc::new(MemoryEntityStore::new());
    let live = new_live_queues();
    let sup = supervisor(store.clone(), live.clone());

    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(async move { sup.run(rx, run_cancel).await });

    store.put_queue(queue).await;
    tx.send(SupervisorEvent::Created(queue_id)).await.unwrap();
    tokio::time::advance(StdDuration::from_secs(60)).await;
    tokio::task::yield_now().await;
    assert!(live.lock().contains_key(&queue_id));

    cancel.cancel();
    let _ = handle.await;
}

#[tokio::test(start_paused = true)]
async fn deleted_event_removes_the_queue_from_the_live_set() {
    let queue = always_on_queue();
    let queue_id = queue.id;
    let store = Arc::new(MemoryEntityStore::new());
    store.put_queue(queue).await;
    let live = new_live_queues();
    live.lock().insert(queue_id, always_on_queue());
    let sup = supervisor(store, live.clone());

    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(async move { sup.run(rx, run_cancel).await });

    tx.send(SupervisorEvent::Deleted(queue_id)).await.unwrap();
    tokio::task::yield_now().await;
    assert!(!live.lock().contains_key(&queue_id));

    cancel.cancel();
    let _ = handle.await;
}
