// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Node` entity: a single cluster member's published identity.

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// A cluster node as published to `/nodes/<node-id>`.
///
/// Re-announced with a fresh TTL every `ttl - 2` seconds; the entry expires
/// naturally when the process stops updating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub cluster: String,
    pub address: String,
    pub port: u16,
    /// The address this node believes is the current master's API endpoint,
    /// used by slaves to build their 301 redirect target.
    pub master_uri: Option<String>,
}

impl Node {
    pub fn new(cluster: impl Into<String>, address: impl Into<String>, port: u16) -> Self {
        Self {
            id: NodeId::new(),
            cluster: cluster.into(),
            address: address.into(),
            port,
            master_uri: None,
        }
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
