// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use horae_core::{Action, Operation, QueueId};
use horae_store::{EntityStore, MemoryEntityStore};

#[tokio::test]
async fn failed_action_marks_the_task_as_failure() {
    let store = Arc::new(MemoryEntityStore::new());
    let queue_id = QueueId::new();
    let action = Action::new(Operation::Get, "http://127.0.0.1:1/");
    store.put_action(action.clone()).await;
    let task = Task::new(queue_id, 1, action.id);
    store.put_task(task.clone()).await;

    let exec = SyncExecutor { http: reqwest::Client::new(), store: store.clone(), queue_id, api_uri: "http://node:7117".to_string() };
    let (_complete_tx, complete_rx) = mpsc::channel(4);
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(async move { exec.run(complete_rx, run_cancel).await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();
    handle.await.unwrap();

    let stored = store.get_task(task.id).await.unwrap();
    assert_eq!(stored.status, TaskStatus::Failure);
}

#[tokio::test]
async fn wait_for_completion_ignores_signals_for_other_tasks() {
    let (tx, mut rx) = mpsc::channel(4);
    let target = TaskId::new();
    tx.send(TaskId::new()).await.unwrap();
    tx.send(target).await.unwrap();

    let completed = SyncExecutor::<MemoryEntityStore>::wait_for_completion(&mut rx, target).await;
    assert!(completed);
}

#[tokio::test]
async fn wait_for_completion_returns_false_when_the_channel_closes() {
    let (tx, mut rx) = mpsc::channel::<TaskId>(4);
    drop(tx);
    let completed = SyncExecutor::<MemoryEntityStore>::wait_for_completion(&mut rx, TaskId::new()).await;
    assert!(!completed);
}

#[test]
fn ctx_for_builds_the_completion_uri_from_the_api_uri() {
    let store = Arc::new(MemoryEntityStore::new());
    let exec = SyncExecutor { http: reqwest::Client::new(), store, queue_id: QueueId::new(), api_uri: "http://node:7117".to_string() };
    let task = Task::new(QueueId::new(), 1, horae_core::ActionId::new());
    let ctx = exec.ctx_for(&task, "running");
    assert_eq!(ctx.completion_uri, format!("http://node:7117/v1/tasks/{}/complete", task.id));
    assert_eq!(ctx.task_status, "running");
}
