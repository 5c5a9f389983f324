// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use horae_coordination::MemoryCoordinationClient;

#[tokio::test(start_paused = true)]
async fn sole_node_becomes_master() {
    let client = Arc::new(MemoryCoordinationClient::new());
    let cancel = CancellationToken::new();
    let node = Node::new("default", "10.0.0.1", 7117);

    let registrar = Registrar::new(client, "default", node);
    let mut rx = registrar.spawn(cancel.clone());

    tokio::time::advance(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;
    assert!(rx.changed().await.is_ok());
    assert_eq!(*rx.borrow(), MasterState::Master);

    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn later_node_becomes_slave_of_the_earlier_one() {
    let client = Arc::new(MemoryCoordinationClient::new());
    let cancel = CancellationToken::new();

    let first = Node::new("default", "10.0.0.1", 7117);
    let registrar_a = Registrar::new(client.clone(), "default", first.clone());
    let mut rx_a = registrar_a.spawn(cancel.clone());
    tokio::time::advance(Duration::from_millis(1)).await;

    let second = Node::new("default", "10.0.0.2", 7117);
    let registrar_b = Registrar::new(client, "default", second);
    let mut rx_b = registrar_b.spawn(cancel.clone());

    tokio::time::advance(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;

    assert!(rx_a.changed().await.is_ok());
    assert_eq!(*rx_a.borrow(), MasterState::Master);

    assert!(rx_b.changed().await.is_ok());
    assert_eq!(*rx_b.borrow(), MasterState::Slave { address: "10.0.0.1".to_string(), port: 7117 });

    cancel.cancel();
}
