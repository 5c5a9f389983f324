// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store-Update Worker Pool: a fixed pool of workers applying put/delete
//! requests against the coordination store, used to publish short-TTL
//! `/updates/...` markers without blocking the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use horae_coordination::CoordinationClient;
use horae_store::MarkerPublisher;

const QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_WORKER_COUNT: usize = 10;
pub const MARKER_TTL_SECS: u64 = 20;

#[derive(Debug, Clone)]
enum UpdateAction {
    Put { value: String, ttl: u64 },
    Delete,
}

#[derive(Debug, Clone)]
struct UpdateRequest {
    action: UpdateAction,
    key: String,
}

/// Handle held by callers (Entity Services, markers, ownership claims) to
/// enqueue coordination-store writes onto the worker pool.
#[derive(Clone)]
pub struct UpdateHandle {
    cluster: String,
    sender: mpsc::Sender<UpdateRequest>,
}

impl UpdateHandle {
    fn qualify(&self, key: &str) -> String {
        if key.starts_with('/') {
            format!("/{}{key}", self.cluster)
        } else {
            format!("/{}/{key}", self.cluster)
        }
    }

    pub async fn put(&self, key: &str, value: impl Into<String>, ttl: u64) {
        let key = self.qualify(key);
        let _ = self.sender.send(UpdateRequest { action: UpdateAction::Put { value: value.into(), ttl }, key }).await;
    }

    pub async fn delete(&self, key: &str) {
        let key = self.qualify(key);
        let _ = self.sender.send(UpdateRequest { action: UpdateAction::Delete, key }).await;
    }
}

#[async_trait]
impl MarkerPublisher for UpdateHandle {
    async fn publish(&self, key: &str, value: &str) {
        self.put(key, value.to_string(), MARKER_TTL_SECS).await;
    }
}

/// Spawns `worker_count` workers draining a shared request channel and
/// returns a cloneable handle to enqueue onto it.
pub fn spawn_pool<C: CoordinationClient>(
    client: Arc<C>,
    cluster: impl Into<String>,
    worker_count: usize,
    cancel: CancellationToken,
) -> UpdateHandle {
    let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
    let rx = Arc::new(Mutex::new(rx));

    for _ in 0..worker_count {
        let client = client.clone();
        let rx = rx.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                let request = {
                    let mut guard = rx.lock().await;
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return,
                        item = guard.recv() => item,
                    }
                };
                let Some(request) = request else { return };
                let result = match request.action {
                    UpdateAction::Put { value, ttl } => client.put(&request.key, &value, ttl).await,
                    UpdateAction::Delete => client.delete(&request.key).await,
                };
                if let Err(err) = result {
                    warn!(error = %err, key = %request.key, "store-update worker request failed");
                }
            }
        });
    }

    UpdateHandle { cluster: cluster.into(), sender: tx }
}

#[cfg(test)]
#[path = "update_worker_tests.rs"]
mod tests;
