// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use horae_core::{ActionId, QueueId, SimClock, Task};
use horae_store::{EntityStore, MemoryEntityStore};

fn executor(store: Arc<MemoryEntityStore>, clock: SimClock, queue_id: QueueId) -> AsyncExecutor<MemoryEntityStore, SimClock> {
    AsyncExecutor { http: reqwest::Client::new(), store, queue_id, api_uri: "http://node:7117".to_string(), clock }
}

fn task_due_at(queue_id: QueueId, when: DateTime<Utc>) -> Task {
    let mut task = Task::new(queue_id, 1, ActionId::new());
    task.when = Some(when);
    task
}

#[tokio::test]
async fn requery_and_arm_arms_a_task_due_within_the_slice() {
    let now = Utc::now();
    let clock = SimClock::at(now);
    let store = Arc::new(MemoryEntityStore::new());
    let queue_id = QueueId::new();
    let task = task_due_at(queue_id, now + Duration::minutes(2));
    store.put_task(task.clone()).await;

    let exec = executor(store, clock, queue_id);
    let timers: TimerMap = Arc::new(Mutex::new(HashMap::new()));
    let window = Arc::new(Mutex::new(now));

    exec.requery_and_arm(&timers, &window, None).await;

    assert!(timers.lock().contains_key(&task.id));
}

#[tokio::test]
async fn requery_and_arm_ignores_tasks_outside_the_slice() {
    let now = Utc::now();
    let clock = SimClock::at(now);
    let store = Arc::new(MemoryEntityStore::new());
    let queue_id = QueueId::new();
    let task = task_due_at(queue_id, now + Duration::hours(2));
    store.put_task(task.clone()).await;

    let exec = executor(store, clock, queue_id);
    let timers: TimerMap = Arc::new(Mutex::new(HashMap::new()));
    let window = Arc::new(Mutex::new(now));

    exec.requery_and_arm(&timers, &window, None).await;

    assert!(!timers.lock().contains_key(&task.id));
}

#[tokio::test]
async fn disarm_cancels_and_removes_the_timer() {
    let now = Utc::now();
    let clock = SimClock::at(now);
    let store = Arc::new(MemoryEntityStore::new());
    let queue_id = QueueId::new();
    let task = task_due_at(queue_id, now + Duration::minutes(1));

    let exec = executor(store, clock, queue_id);
    let timers: TimerMap = Arc::new(Mutex::new(HashMap::new()));
    exec.arm(&timers, task.clone());
    assert!(timers.lock().contains_key(&task.id));

    AsyncExecutor::<MemoryEntityStore, SimClock>::disarm(&timers, task.id);
    assert!(!timers.lock().contains_key(&task.id));
}

#[tokio::test]
async fn handle_upsert_skips_a_task_beyond_the_current_window() {
    let now = Utc::now();
    let clock = SimClock::at(now);
    let store = Arc::new(MemoryEntityStore::new());
    let queue_id = QueueId::new();
    let task = task_due_at(queue_id, now + Duration::hours(3));
    store.put_task(task.clone()).await;

    let exec = executor(store, clock, queue_id);
    let timers: TimerMap = Arc::new(Mutex::new(HashMap::new()));
    let window = Arc::new(Mutex::new(now + Duration::minutes(5)));

    exec.handle_upsert(&timers, &window, task.id).await;
    assert!(!timers.lock().contains_key(&task.id));
}

#[test]
fn unknown_task_id_status_label_defaults_to_running() {
    assert_eq!(status_label(TaskStatus::Pending), "running");
}
