// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process `CoordinationClient`, used by tests and single-node demos.
//!
//! A `CancellationToken`-driven sweep loop over `Arc<Mutex<..>>`-guarded
//! state, the same shape `horae-daemon`'s own runtime uses elsewhere.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::{ChildEntry, CoordinationClient, Event, EventKind, WatchReceiver};
use crate::error::Result;

const SWEEP_INTERVAL: Duration = Duration::from_secs(1);
const WATCH_CHANNEL_CAPACITY: usize = 64;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
    create_index: i64,
}

struct Watcher {
    prefix: String,
    recursive: bool,
    sender: mpsc::Sender<Event>,
}

#[derive(Default)]
struct Shared {
    entries: Mutex<HashMap<String, Entry>>,
    watchers: Mutex<Vec<Watcher>>,
    next_index: AtomicI64,
}

impl Shared {
    fn notify(&self, kind: EventKind, key: &str, value: &str) {
        let mut watchers = self.watchers.lock();
        watchers.retain(|w| {
            if !matches(&w.prefix, w.recursive, key) {
                return true;
            }
            // Best-effort delivery: a full or closed channel means the
            // watcher is gone or lagging, in which case the next `watch`
            // call will re-establish it per the coordination contract.
            w.sender.try_send(Event { kind, key: key.to_string(), value: value.to_string() }).is_ok()
        });
    }

    fn sweep(&self) {
        let now = Instant::now();
        let expired: Vec<(String, String)> = {
            let mut entries = self.entries.lock();
            let expired_keys: Vec<String> = entries
                .iter()
                .filter(|(_, e)| e.expires_at.is_some_and(|at| at <= now))
                .map(|(k, _)| k.clone())
                .collect();
            expired_keys
                .into_iter()
                .filter_map(|k| entries.remove(&k).map(|e| (k, e.value)))
                .collect()
        };
        for (key, value) in expired {
            self.notify(EventKind::Expire, &key, &value);
        }
    }
}

fn matches(prefix: &str, recursive: bool, key: &str) -> bool {
    let Some(rest) = key.strip_prefix(prefix) else { return false };
    recursive || !rest.trim_start_matches('/').contains('/')
}

/// In-memory coordination store backed by a monotonic create-index counter
/// and a broadcast of events to active watchers.
pub struct MemoryCoordinationClient {
    shared: Arc<Shared>,
    cancel: CancellationToken,
    sweeper: Option<JoinHandle<()>>,
}

impl MemoryCoordinationClient {
    pub fn new() -> Self {
        let shared = Arc::new(Shared::default());
        let cancel = CancellationToken::new();
        let sweeper = {
            let shared = shared.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return,
                        _ = tokio::time::sleep(SWEEP_INTERVAL) => shared.sweep(),
                    }
                }
            })
        };
        Self { shared, cancel, sweeper: Some(sweeper) }
    }

    /// Cancels the TTL sweep loop and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.sweeper.take() {
            let _ = handle.await;
        }
    }
}

impl Default for MemoryCoordinationClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MemoryCoordinationClient {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[async_trait]
impl CoordinationClient for MemoryCoordinationClient {
    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let existed;
        let index;
        {
            let mut entries = self.shared.entries.lock();
            existed = entries.contains_key(key);
            index = self.shared.next_index.fetch_add(1, Ordering::SeqCst);
            let expires_at = (ttl_secs > 0).then(|| Instant::now() + Duration::from_secs(ttl_secs));
            entries.insert(key.to_string(), Entry { value: value.to_string(), expires_at, create_index: index });
        }
        let kind = if existed { EventKind::Set } else { EventKind::Create };
        self.shared.notify(kind, key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let removed = self.shared.entries.lock().remove(key);
        if let Some(entry) = removed {
            self.shared.notify(EventKind::Delete, key, &entry.value);
        }
        Ok(())
    }

    async fn children(&self, prefix: &str, recursive: bool) -> Result<Vec<ChildEntry>> {
        let entries = self.shared.entries.lock();
        Ok(entries
            .iter()
            .filter(|(key, _)| matches(prefix, recursive, key))
            .map(|(key, entry)| ChildEntry { key: key.clone(), value: entry.value.clone(), create_index: entry.create_index })
            .collect())
    }

    async fn watch(&self, prefix: &str, recursive: bool) -> Result<WatchReceiver> {
        let (tx, rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);
        self.shared.watchers.lock().push(Watcher { prefix: prefix.to_string(), recursive, sender: tx });
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
