// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue-Ownership Monitor: one per locally managed queue.
//! Combines (a) an on-demand ownership election started by `BecomeMaster`
//! and torn down by `ReleaseMaster`, (b) a watch on
//! `/updates/queues/<queue-id>`, and (c) a recursive watch on
//! `/updates/tasks/`, both delivered to the owning Queue Manager as
//! `ManagerEvent`s. Both watchers restart on a null event.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use horae_coordination::{CoordinationClient, EventKind};
use horae_core::{NodeId, QueueId, TaskId};

use crate::elector::{ElectionRole, Elector};

const RECONNECT_BACKOFF: Duration = Duration::from_secs(1);
const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipCommand {
    BecomeMaster,
    ReleaseMaster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerEvent {
    BecameQueueMaster,
    BecameQueueSlave,
    QueueChanged { action: String },
    TaskChanged { task_id: TaskId, action: String },
}

pub struct OwnershipMonitor<C> {
    client: Arc<C>,
    cluster: String,
    queue_id: QueueId,
    node_id: NodeId,
}

impl<C: CoordinationClient> OwnershipMonitor<C> {
    pub fn new(client: Arc<C>, cluster: impl Into<String>, queue_id: QueueId, node_id: NodeId) -> Self {
        Self { client, cluster: cluster.into(), queue_id, node_id }
    }

    pub fn spawn(self, cancel: CancellationToken) -> (mpsc::Sender<OwnershipCommand>, mpsc::Receiver<ManagerEvent>) {
        let (evt_tx, evt_rx) = mpsc::channel(CHANNEL_CAPACITY);

        spawn_queue_watch(self.client.clone(), self.cluster.clone(), self.queue_id, cancel.clone(), evt_tx.clone());
        spawn_task_watch(self.client.clone(), self.cluster.clone(), cancel.clone(), evt_tx.clone());

        let (cmd_tx, mut cmd_rx) = mpsc::channel(16);
        let client = self.client;
        let cluster = self.cluster;
        let queue_id = self.queue_id;
        let node_id = self.node_id;

        tokio::spawn(async move {
            let mut election: Option<CancellationToken> = None;
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        if let Some(token) = election { token.cancel(); }
                        return;
                    }
                    command = cmd_rx.recv() => {
                        match command {
                            Some(OwnershipCommand::BecomeMaster) => {
                                if election.is_some() {
                                    continue;
                                }
                                let key = format!("/{cluster}/queues/{queue_id}/{node_id}");
                                let prefix = format!("/{cluster}/queues/{queue_id}");
                                let elector = Elector::new(client.clone(), prefix, key, node_id.to_string());
                                let local_cancel = CancellationToken::new();
                                let mut role_rx = elector.spawn(local_cancel.clone());
                                election = Some(local_cancel);

                                let evt_tx = evt_tx.clone();
                                tokio::spawn(async move {
                                    while role_rx.changed().await.is_ok() {
                                        let (role, _) = role_rx.borrow().clone();
                                        let event = match role {
                                            ElectionRole::Leader => {
                                                info!(%queue_id, "became queue master");
                                                ManagerEvent::BecameQueueMaster
                                            }
                                            ElectionRole::Follower => {
                                                info!(%queue_id, "became queue slave");
                                                ManagerEvent::BecameQueueSlave
                                            }
                                        };
                                        if evt_tx.send(event).await.is_err() {
                                            return;
                                        }
                                    }
                                });
                            }
                            Some(OwnershipCommand::ReleaseMaster) => {
                                if let Some(token) = election.take() {
                                    token.cancel();
                                    let key = format!("/{cluster}/queues/{queue_id}/{node_id}");
                                    if let Err(err) = client.delete(&key).await {
                                        warn!(error = %err, %queue_id, "failed to release queue ownership entry");
                                    }
                                }
                            }
                            None => return,
                        }
                    }
                }
            }
        });

        (cmd_tx, evt_rx)
    }
}

fn spawn_queue_watch<C: CoordinationClient>(
    client: Arc<C>,
    cluster: String,
    queue_id: QueueId,
    cancel: CancellationToken,
    evt_tx: mpsc::Sender<ManagerEvent>,
) {
    let key = format!("/{cluster}/updates/queues/{queue_id}");
    tokio::spawn(async move {
        loop {
            let mut watch_rx = match client.watch(&key, false).await {
                Ok(rx) => rx,
                Err(err) => {
                    warn!(error = %err, %queue_id, "failed to watch queue updates, retrying");
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
                let Some(event) = event else { break };
                if event.kind == EventKind::Expire {
                    continue;
                }
                let sent = evt_tx.send(ManagerEvent::QueueChanged { action: event.value }).await;
                if sent.is_err() {
                    return;
                }
            }
        }
    });
}

fn spawn_task_watch<C: CoordinationClient>(client: Arc<C>, cluster: String, cancel: CancellationToken, evt_tx: mpsc::Sender<ManagerEvent>) {
    let prefix = format!("/{cluster}/updates/tasks");
    tokio::spawn(async move {
        loop {
            let mut watch_rx = match client.watch(&prefix, true).await {
                Ok(rx) => rx,
                Err(err) => {
                    warn!(error = %err, "failed to watch task updates, retrying");
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
                let Some(event) = event else { break };
                if event.kind == EventKind::Expire {
                    continue;
                }
                let Some(task_id) = event.key.strip_prefix(&prefix).and_then(|rest| rest.trim_start_matches('/').parse().ok()) else {
                    continue;
                };
                let sent = evt_tx.send(ManagerEvent::TaskChanged { task_id, action: event.value }).await;
                if sent.is_err() {
                    return;
                }
            }
        }
    });
}

#[cfg(test)]
#[path = "ownership_tests.rs"]
mod tests;
