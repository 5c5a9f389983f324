// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;

use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::info;

use horae_coordination::EtcdCoordinationClient;
use horae_core::{Node, SystemClock};
use horae_daemon::containment::new_live_queues;
use horae_daemon::{api, config::Config, node, queues_monitor, supervisor::Supervisor, telemetry, update_worker, DaemonError};
use horae_store::MemoryEntityStore;

#[tokio::main]
async fn main() -> Result<(), DaemonError> {
    telemetry::init();

    let config = Config::parse();
    info!(cluster = %config.cluster_name, bind = %config.bind_addr(), "starting horaed");

    let coordination = Arc::new(EtcdCoordinationClient::connect(&config.coordination_address).await?);
    let store = Arc::new(MemoryEntityStore::new());

    let root_cancel = CancellationToken::new();

    let markers = Arc::new(update_worker::spawn_pool(
        coordination.clone(),
        config.cluster_name.clone(),
        update_worker::DEFAULT_WORKER_COUNT,
        root_cancel.child_token(),
    ));

    // Bind first so a random port (`use_static_port = false`) is known before
    // the node registers itself or advertises its API URI.
    let requested_addr = if config.use_static_port { config.bind_addr() } else { format!("{}:0", config.api_bind) };
    let listener = tokio::net::TcpListener::bind(&requested_addr).await.map_err(|source| DaemonError::Bind { addr: requested_addr, source })?;
    let bound_port = listener.local_addr().map_err(|source| DaemonError::Bind { addr: config.bind_addr(), source })?.port();

    let advertise_address = if config.api_bind == "0.0.0.0" { "127.0.0.1".to_string() } else { config.api_bind.clone() };
    let this_node = Node::new(config.cluster_name.clone(), advertise_address.clone(), bound_port);
    let node_id = this_node.id;

    let registrar = node::Registrar::new(coordination.clone(), config.cluster_name.clone(), this_node);
    let master_rx = registrar.spawn(root_cancel.child_token());

    let supervisor_events = queues_monitor::spawn(coordination.clone(), config.cluster_name.clone(), root_cancel.child_token());

    let live = new_live_queues();
    let api_uri = format!("http://{advertise_address}:{bound_port}");
    let supervisor = Supervisor {
        store: store.clone(),
        coordination: coordination.clone(),
        cluster: config.cluster_name.clone(),
        node_id,
        api_uri,
        http: reqwest::Client::new(),
        clock: SystemClock,
        live,
    };
    tokio::spawn(supervisor.run(supervisor_events, root_cancel.child_token()));

    let app = api::app(store, markers, master_rx);

    let shutdown_cancel = root_cancel.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            shutdown_cancel.cancel();
        })
        .await
        .map_err(|err| DaemonError::CoreFailure(err.to_string()))?;

    Ok(())
}

async fn wait_for_shutdown_signal() {
    let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(term), Ok(int)) => (term, int),
        (Err(err), _) | (_, Err(err)) => {
            tracing::error!(error = %err, "failed to install signal handler, shutting down immediately");
            return;
        }
    };
    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }
}
