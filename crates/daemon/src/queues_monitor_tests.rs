// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use horae_coordination::MemoryCoordinationClient;
use horae_core::QueueId;

#[tokio::test]
async fn create_and_delete_markers_are_forwarded() {
    let client = Arc::new(MemoryCoordinationClient::new());
    let cancel = CancellationToken::new();
    let mut rx = spawn(client.clone(), "default", cancel.clone());
    tokio::task::yield_now().await;

    let queue_id = QueueId::new();
    client.put(&format!("/default/updates/queues/{queue_id}"), "create", 20).await.unwrap();
    client.delete(&format!("/default/updates/queues/{queue_id}")).await.unwrap();

    assert_eq!(rx.recv().await, Some(SupervisorEvent::Created(queue_id)));
    assert_eq!(rx.recv().await, Some(SupervisorEvent::Deleted(queue_id)));

    cancel.cancel();
}

#[tokio::test]
async fn non_queue_id_keys_are_ignored() {
    let client = Arc::new(MemoryCoordinationClient::new());
    let cancel = CancellationToken::new();
    let mut rx = spawn(client.clone(), "default", cancel.clone());
    tokio::task::yield_now().await;

    client.put("/default/updates/queues/not-a-uuid", "create", 20).await.unwrap();
    let queue_id = QueueId::new();
    client.put(&format!("/default/updates/queues/{queue_id}"), "create", 20).await.unwrap();

    assert_eq!(rx.recv().await, Some(SupervisorEvent::Created(queue_id)));
    cancel.cancel();
}
