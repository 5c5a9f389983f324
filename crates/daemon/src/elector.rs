// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generic lowest-create-index election, shared by the cluster Master
//! Elector (`node.rs`) and the per-queue Queue-Ownership Monitor
//! (`ownership.rs`): register under a key with a random TTL, refresh at
//! `TTL-2`, then every 30 s (first check after 2 s) list the prefix and
//! pick the entry with the smallest create-index.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use horae_coordination::CoordinationClient;

const ELECTION_INTERVAL: Duration = Duration::from_secs(30);
const FIRST_ELECTION_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectionRole {
    Leader,
    Follower,
}

/// Current election result: the role, plus the winner's raw stored value
/// (useful to followers that need to decode the leader's identity).
pub type ElectionResult = (ElectionRole, Option<String>);

pub struct Elector<C> {
    client: Arc<C>,
    prefix: String,
    self_key: String,
    self_value: String,
}

impl<C: CoordinationClient> Elector<C> {
    pub fn new(client: Arc<C>, prefix: impl Into<String>, self_key: impl Into<String>, self_value: impl Into<String>) -> Self {
        Self { client, prefix: prefix.into(), self_key: self_key.into(), self_value: self_value.into() }
    }

    /// Spawns the TTL refresher and periodic election as independent
    /// tasks bound to `cancel`, returning a watch channel of the latest
    /// `ElectionResult`.
    pub fn spawn(self, cancel: CancellationToken) -> watch::Receiver<ElectionResult> {
        let ttl = rand::thread_rng().gen_range(10..20u64);
        let refresh_period = Duration::from_secs(ttl.saturating_sub(2).max(1));

        {
            let client = self.client.clone();
            let key = self.self_key.clone();
            let value = self.self_value.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    if let Err(err) = client.put(&key, &value, ttl).await {
                        warn!(error = %err, key, "failed to refresh registration");
                    }
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return,
                        _ = tokio::time::sleep(refresh_period) => {}
                    }
                }
            });
        }

        let (tx, rx) = watch::channel((ElectionRole::Follower, None));
        {
            let client = self.client.clone();
            let prefix = self.prefix.clone();
            let self_key = self.self_key.clone();
            tokio::spawn(async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(FIRST_ELECTION_DELAY) => {}
                }
                loop {
                    match client.children(&prefix, false).await {
                        Ok(children) => {
                            if let Some(winner) = children.iter().min_by_key(|c| c.create_index) {
                                let result = if winner.key == self_key {
                                    (ElectionRole::Leader, None)
                                } else {
                                    (ElectionRole::Follower, Some(winner.value.clone()))
                                };
                                let _ = tx.send(result);
                            }
                        }
                        Err(err) => warn!(error = %err, prefix, "election list failed, keeping current state"),
                    }
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return,
                        _ = tokio::time::sleep(ELECTION_INTERVAL) => {}
                    }
                }
            });
        }

        rx
    }
}

#[cfg(test)]
#[path = "elector_tests.rs"]
mod tests;
