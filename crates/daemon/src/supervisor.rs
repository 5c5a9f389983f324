// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue Supervisor: at startup lists every active queue and spawns one
//! Queue Manager per queue; afterwards reacts to the Global Queues
//! Monitor's create/delete signals.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use horae_core::{Clock, NodeId, QueueId, QueueStatus};
use horae_coordination::CoordinationClient;
use horae_store::EntityStore;

use crate::containment::{ContainmentEvaluator, LiveQueues};
use crate::ownership::OwnershipMonitor;
use crate::queue_manager::QueueManager;
use crate::queues_monitor::SupervisorEvent;

pub struct Supervisor<S, C, Cl> {
    pub store: Arc<S>,
    pub coordination: Arc<C>,
    pub cluster: String,
    pub node_id: NodeId,
    pub api_uri: String,
    pub http: reqwest::Client,
    pub clock: Cl,
    pub live: LiveQueues,
}

impl<S, C, Cl> Supervisor<S, C, Cl>
where
    S: EntityStore + 'static,
    C: CoordinationClient + 'static,
    Cl: Clock,
{
    /// Spawns a Queue Manager for every currently active queue, then drives
    /// `supervisor_events` for the lifetime of `cancel`, spawning/retiring
    /// managers as queues are created and deleted elsewhere in the cluster.
    pub async fn run(self, mut supervisor_events: mpsc::Receiver<SupervisorEvent>, cancel: CancellationToken) {
        let containment = Arc::new(ContainmentEvaluator::new(self.live.clone()));
        let mut managed: HashMap<QueueId, CancellationToken> = HashMap::new();

        for queue in self.store.list_active_queues().await {
            self.spawn_manager(queue.id, &containment, &mut managed, &cancel);
        }

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    for token in managed.into_values() {
                        token.cancel();
                    }
                    return;
                }
                event = supervisor_events.recv() => {
                    match event {
                        None => return,
                        Some(SupervisorEvent::Created(queue_id)) => {
                            if managed.contains_key(&queue_id) {
                                continue;
                            }
                            match self.store.get_queue(queue_id).await {
                                Some(queue) if queue.status != QueueStatus::Deleted => {
                                    info!(%queue_id, "spawning queue manager");
                                    self.spawn_manager(queue_id, &containment, &mut managed, &cancel);
                                }
                                Some(_) => {}
                                None => warn!(%queue_id, "create event for unknown queue"),
                            }
                        }
                        Some(SupervisorEvent::Deleted(queue_id)) => {
                            managed.remove(&queue_id);
                            self.live.lock().remove(&queue_id);
                        }
                    }
                }
            }
        }
    }

    fn spawn_manager(&self, queue_id: QueueId, containment: &Arc<ContainmentEvaluator>, managed: &mut HashMap<QueueId, CancellationToken>, parent: &CancellationToken) {
        let manager_cancel = parent.child_token();
        let monitor = OwnershipMonitor::new(self.coordination.clone(), self.cluster.clone(), queue_id, self.node_id);
        let (ownership_cmd, ownership_evt) = monitor.spawn(manager_cancel.clone());

        let manager = QueueManager {
            queue_id,
            api_uri: self.api_uri.clone(),
            store: self.store.clone(),
            http: self.http.clone(),
            clock: self.clock.clone(),
            live: self.live.clone(),
            containment: containment.clone(),
            ownership_cmd,
        };

        let run_cancel = manager_cancel.clone();
        tokio::spawn(async move { manager.run(ownership_evt, run_cancel).await });
        managed.insert(queue_id, manager_cancel);
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
