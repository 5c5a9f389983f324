// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process configuration, loaded through `clap::Parser` with `env` attributes
//! so environment variables are read by `clap` itself and win over a flag's
//! default, matching the source's documented precedence.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "horaed", about = "Horae distributed task-scheduling node")]
pub struct Config {
    /// Cluster name; nodes sharing a name share a coordination-store subtree.
    #[arg(long, env = "HORAE_CLUSTERNAME", default_value = "default")]
    pub cluster_name: String,

    /// Coordination-store (etcd) address.
    #[arg(long, env = "HORAE_ETCD_ADDRESS", default_value = "127.0.0.1:4001")]
    pub coordination_address: String,

    /// Persistent-store (Cassandra) address.
    #[arg(long, env = "HORAE_CASSANDRA_ADDRESS", default_value = "127.0.0.1")]
    pub store_address: String,

    /// When true, the API binds `api_port` exactly; when false, a random
    /// free port is chosen at startup.
    #[arg(long, env = "HORAE_USE_STATIC_PORT", default_value = "true")]
    pub use_static_port: bool,

    /// Administration API bind address.
    #[arg(long, env = "HORAE_API_BIND", default_value = "0.0.0.0")]
    pub api_bind: String,

    /// Administration API bind port (used when `use_static_port` is true).
    #[arg(long, env = "HORAE_API_PORT", default_value = "7117")]
    pub api_port: u16,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_bind, self.api_port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
