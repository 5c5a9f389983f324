// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global Queues Monitor: a singleton per node watching `/updates/queues/`
//! recursively so the Queue Supervisor can spawn or retire a Queue Manager
//! on `create`/`delete`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use horae_coordination::CoordinationClient;
use horae_core::QueueId;

const RECONNECT_BACKOFF: Duration = Duration::from_secs(1);
const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorEvent {
    Created(QueueId),
    Deleted(QueueId),
}

fn queue_id_from_key(key: &str, prefix: &str) -> Option<QueueId> {
    key.strip_prefix(prefix)?.trim_start_matches('/').parse().ok()
}

pub fn spawn<C: CoordinationClient>(client: Arc<C>, cluster: impl Into<String>, cancel: CancellationToken) -> mpsc::Receiver<SupervisorEvent> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let prefix = format!("/{}/updates/queues", cluster.into());

    tokio::spawn(async move {
        loop {
            let mut watch_rx = match client.watch(&prefix, true).await {
                Ok(rx) => rx,
                Err(err) => {
                    warn!(error = %err, prefix, "failed to watch global queue updates, retrying");
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return,
                        _ = tokio::time::sleep(RECONNECT_BACKOFF) => continue,
                    }
                }
            };

            loop {
                let event = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    event = watch_rx.recv() => event,
                };
                let Some(event) = event else {
                    // Watch ended (null event): re-issue from current index.
                    break;
                };
                let Some(queue_id) = queue_id_from_key(&event.key, &prefix) else { continue };
                let supervisor_event = match event.value.as_str() {
                    "create" => SupervisorEvent::Created(queue_id),
                    "delete" => SupervisorEvent::Deleted(queue_id),
                    _ => continue,
                };
                if tx.send(supervisor_event).await.is_err() {
                    return;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
#[path = "queues_monitor_tests.rs"]
mod tests;
