// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Node Registrar & Master Elector: keeps `/<cluster>/nodes/<node-id>`
//! alive with a TTL and elects the cluster master by lowest create-index,
//! driving the API-Facing Front's master/slave state.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

use horae_coordination::CoordinationClient;
use horae_core::Node;

use crate::elector::{ElectionRole, Elector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterState {
    Unavailable,
    Master,
    Slave { address: String, port: u16 },
}

pub struct Registrar<C> {
    client: Arc<C>,
    cluster: String,
    node: Node,
}

impl<C: CoordinationClient> Registrar<C> {
    pub fn new(client: Arc<C>, cluster: impl Into<String>, node: Node) -> Self {
        Self { client, cluster: cluster.into(), node }
    }

    pub fn spawn(self, cancel: CancellationToken) -> watch::Receiver<MasterState> {
        let key = format!("/{}/nodes/{}", self.cluster, self.node.id);
        let prefix = format!("/{}/nodes", self.cluster);
        let value = serde_json::to_string(&self.node).unwrap_or_default();

        let elector = Elector::new(self.client, prefix, key, value);
        let mut role_rx = elector.spawn(cancel);

        let (tx, rx) = watch::channel(MasterState::Unavailable);
        tokio::spawn(async move {
            while role_rx.changed().await.is_ok() {
                let (role, leader_value) = role_rx.borrow().clone();
                let state = match role {
                    ElectionRole::Leader => {
                        info!("became master");
                        MasterState::Master
                    }
                    ElectionRole::Follower => match leader_value.and_then(|v| serde_json::from_str::<Node>(&v).ok()) {
                        Some(leader) => {
                            info!(master_address = %leader.address, master_port = leader.port, "became slave");
                            MasterState::Slave { address: leader.address, port: leader.port }
                        }
                        None => MasterState::Unavailable,
                    },
                };
                if tx.send(state).is_err() {
                    return;
                }
            }
        });

        rx
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
