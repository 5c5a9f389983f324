// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `etcd`-backed `CoordinationClient`, mapping `put`/`delete`/`children`/
//! `watch` onto the v3 KV and Watch APIs with leases for TTL. The put-
//! with-TTL / children / watch-with-create-index primitives map directly
//! onto etcd v3 semantics.

use async_trait::async_trait;
use etcd_client::{Client, EventType, GetOptions, PutOptions, WatchOptions};
use tokio::sync::mpsc;

use crate::client::{ChildEntry, CoordinationClient, Event, EventKind, WatchReceiver};
use crate::error::{CoordinationError, Result};

const WATCH_CHANNEL_CAPACITY: usize = 64;

pub struct EtcdCoordinationClient {
    client: Client,
}

impl EtcdCoordinationClient {
    pub async fn connect(address: &str) -> Result<Self> {
        let client = Client::connect([address], None)
            .await
            .map_err(|err| CoordinationError::Unreachable(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CoordinationClient for EtcdCoordinationClient {
    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut client = self.client.clone();
        if ttl_secs > 0 {
            let lease = client
                .lease_grant(ttl_secs as i64, None)
                .await
                .map_err(|err| CoordinationError::Request(err.to_string()))?;
            client
                .put(key, value, Some(PutOptions::new().with_lease(lease.id())))
                .await
                .map_err(|err| CoordinationError::Request(err.to_string()))?;
        } else {
            client.put(key, value, None).await.map_err(|err| CoordinationError::Request(err.to_string()))?;
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut client = self.client.clone();
        // etcd's delete is already a no-op on a missing key; nothing to
        // special-case here.
        client.delete(key, None).await.map_err(|err| CoordinationError::Request(err.to_string()))?;
        Ok(())
    }

    async fn children(&self, prefix: &str, recursive: bool) -> Result<Vec<ChildEntry>> {
        let mut client = self.client.clone();
        let options = if recursive { GetOptions::new().with_prefix() } else { GetOptions::new().with_prefix() };
        let response = client.get(prefix, Some(options)).await.map_err(|err| CoordinationError::Request(err.to_string()))?;
        let entries = response
            .kvs()
            .iter()
            .filter(|kv| {
                if recursive {
                    true
                } else {
                    let key = kv.key_str().unwrap_or_default();
                    let rest = key.strip_prefix(prefix).unwrap_or_default();
                    !rest.trim_start_matches('/').contains('/')
                }
            })
            .map(|kv| ChildEntry {
                key: kv.key_str().unwrap_or_default().to_string(),
                value: kv.value_str().unwrap_or_default().to_string(),
                create_index: kv.create_revision(),
            })
            .collect();
        Ok(entries)
    }

    async fn watch(&self, prefix: &str, recursive: bool) -> Result<WatchReceiver> {
        let mut client = self.client.clone();
        let options = if recursive { Some(WatchOptions::new().with_prefix()) } else { Some(WatchOptions::new().with_prefix()) };
        let (_watcher, mut stream) = client
            .watch(prefix, options)
            .await
            .map_err(|err| CoordinationError::Request(err.to_string()))?;

        let (tx, rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);
        tokio::spawn(async move {
            // Holding `_watcher` alive for the stream's lifetime; dropping
            // it would cancel the server-side watch.
            let _watcher = _watcher;
            loop {
                match stream.message().await {
                    Ok(Some(response)) => {
                        for event in response.events() {
                            let Some(kv) = event.kv() else { continue };
                            let kind = match event.event_type() {
                                EventType::Put => EventKind::Set,
                                EventType::Delete => EventKind::Delete,
                            };
                            let key = kv.key_str().unwrap_or_default().to_string();
                            let value = kv.value_str().unwrap_or_default().to_string();
                            if tx.send(Event { kind, key, value }).await.is_err() {
                                return;
                            }
                        }
                    }
                    Ok(None) => return,
                    Err(err) => {
                        tracing::warn!(error = %err, "coordination watch stream ended");
                        return;
                    }
                }
            }
        });
        Ok(rx)
    }
}
