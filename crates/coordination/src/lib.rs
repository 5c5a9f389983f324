// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! horae-coordination: the `CoordinationClient` abstraction over the
//! cluster's coordination store, with an in-memory implementation for
//! tests/single-node use and an `etcd`-backed implementation for
//! production clusters.

pub mod client;
pub mod error;
pub mod etcd;
pub mod memory;

pub use client::{ChildEntry, CoordinationClient, Event, EventKind, WatchReceiver};
pub use error::{CoordinationError, Result};
pub use etcd::EtcdCoordinationClient;
pub use memory::MemoryCoordinationClient;
