// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `CoordinationClient` abstraction over the coordination store
//! (`/nodes`, `/queues/<id>`, `/updates/...`).

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Set,
    Delete,
    Expire,
    Create,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ChildEntry {
    pub key: String,
    pub value: String,
    pub create_index: i64,
}

/// A long-lived watch. The channel closes (`recv()` returns `None`) when
/// the underlying watch ends — callers must re-issue `watch` in that case,
/// mirroring the source's "null event means re-watch from current index"
/// contract.
pub type WatchReceiver = mpsc::Receiver<Event>;

#[async_trait]
pub trait CoordinationClient: Send + Sync + 'static {
    /// Create-or-update. `ttl_secs == 0` means no expiry.
    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Ignores "not found".
    async fn delete(&self, key: &str) -> Result<()>;

    async fn children(&self, prefix: &str, recursive: bool) -> Result<Vec<ChildEntry>>;

    async fn watch(&self, prefix: &str, recursive: bool) -> Result<WatchReceiver>;
}
