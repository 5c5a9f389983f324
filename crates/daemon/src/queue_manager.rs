// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue Manager: the per-queue state machine `Pre → Start → Running → End
//! → Pre`, gated by ownership and containment, directing the Execution
//! Engine. One instance per locally managed queue, running on its own
//! `tokio` task; all mutation of its queue's volatile fields happens here,
//! serialized by this task's own message loop.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration as ChronoDuration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

use horae_core::{Clock, Queue, QueueId, QueueType, TaskId};
use horae_store::EntityStore;

use crate::containment::{dirname, ContainmentEvaluator, LiveQueues};
use crate::execution::{self, AsyncExecutor, SyncExecutor, TaskEvent};
use crate::ownership::{ManagerEvent, OwnershipCommand};

const RUNNING_RECHECK: StdDuration = StdDuration::from_secs(60);
const START_RETRY: StdDuration = StdDuration::from_secs(60);
const END_PROXIMITY: ChronoDuration = ChronoDuration::seconds(60);
/// No known window end (an open-ended exception): re-check on the usual
/// running cadence rather than scheduling a real end timer.
const NO_END_TIMER: StdDuration = StdDuration::from_secs(u32::MAX as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManagerState {
    Pre,
    Start,
    Running,
    End,
}

enum RunningExecutor {
    None,
    Sync { cancel: CancellationToken },
    Async { cancel: CancellationToken, events_tx: mpsc::Sender<TaskEvent> },
}

impl RunningExecutor {
    fn is_none(&self) -> bool {
        matches!(self, RunningExecutor::None)
    }
}

pub struct QueueManager<S, Cl> {
    pub queue_id: QueueId,
    pub api_uri: String,
    pub store: Arc<S>,
    pub http: reqwest::Client,
    pub clock: Cl,
    pub live: LiveQueues,
    pub containment: Arc<ContainmentEvaluator>,
    pub ownership_cmd: mpsc::Sender<OwnershipCommand>,
}

impl<S: EntityStore, Cl: Clock> QueueManager<S, Cl> {
    /// Drives the state machine until the queue is deleted, its ownership
    /// channel closes, or `cancel` fires.
    pub async fn run(mut self, mut ownership_evt: mpsc::Receiver<ManagerEvent>, cancel: CancellationToken) {
        let Some(mut queue) = self.store.get_queue(self.queue_id).await else {
            return;
        };
        self.set_running(&queue, false);

        let mut state = ManagerState::Pre;
        let mut queue_master = false;
        let mut executor = RunningExecutor::None;
        let mut complete_tx: Option<mpsc::Sender<TaskId>> = None;

        let mut deadline = Instant::now() + self.duration_pre(&queue);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.stop_execution(&mut executor, &mut complete_tx, &queue, "Shutdown").await;
                    return;
                }
                event = ownership_evt.recv() => {
                    let Some(event) = event else { return };
                    match event {
                        ManagerEvent::BecameQueueMaster => {
                            info!(queue_id = %self.queue_id, "became queue master");
                            queue_master = true;
                            state = ManagerState::Start;
                            deadline = Instant::now() + self.duration_start(&queue);
                        }
                        ManagerEvent::BecameQueueSlave => {
                            info!(queue_id = %self.queue_id, "became queue slave");
                            queue_master = false;
                            self.stop_execution(&mut executor, &mut complete_tx, &queue, "Lost Ownership").await;
                        }
                        ManagerEvent::QueueChanged { action } if action == "delete" => {
                            self.stop_execution(&mut executor, &mut complete_tx, &queue, "Queue Deleted").await;
                            let _ = self.ownership_cmd.send(OwnershipCommand::ReleaseMaster).await;
                            return;
                        }
                        ManagerEvent::QueueChanged { .. } => {
                            if let Some(fresh) = self.store.get_queue(self.queue_id).await {
                                queue = fresh;
                            }
                            self.stop_execution(&mut executor, &mut complete_tx, &queue, "Queue Updated").await;
                            state = ManagerState::Pre;
                            deadline = Instant::now() + self.duration_pre(&queue);
                        }
                        ManagerEvent::TaskChanged { task_id, action } => {
                            if action == "create" {
                                execution::backpressure::check(&self.http, self.store.as_ref(), &self.api_uri, &queue).await;
                            }
                            self.forward_task_event(&queue, &executor, &complete_tx, task_id, &action).await;
                        }
                    }
                }
                () = tokio::time::sleep_until(deadline) => {
                    deadline = self.on_timer(&mut state, &mut queue, &mut executor, &mut complete_tx, queue_master).await;
                }
            }
        }
    }

    async fn on_timer(
        &self,
        state: &mut ManagerState,
        queue: &mut Queue,
        executor: &mut RunningExecutor,
        complete_tx: &mut Option<mpsc::Sender<TaskId>>,
        queue_master: bool,
    ) -> Instant {
        match *state {
            ManagerState::Pre => {
                let _ = self.ownership_cmd.send(OwnershipCommand::BecomeMaster).await;
                *state = ManagerState::Start;
                Instant::now() + self.duration_start(queue)
            }
            ManagerState::Start => {
                if !queue_master {
                    return Instant::now() + START_RETRY;
                }
                if self.should_run(queue) {
                    self.start_execution(queue, executor, complete_tx).await;
                    *state = ManagerState::Running;
                    Instant::now() + RUNNING_RECHECK
                } else if self.within_end_proximity(queue) {
                    *state = ManagerState::End;
                    Instant::now() + self.duration_end(queue)
                } else {
                    Instant::now() + START_RETRY
                }
            }
            ManagerState::Running => {
                if !self.should_run(queue) {
                    self.stop_execution(executor, complete_tx, queue, "Lost Containment").await;
                    *state = ManagerState::Start;
                    Instant::now() + START_RETRY
                } else if self.within_end_proximity(queue) {
                    *state = ManagerState::End;
                    Instant::now() + self.duration_end(queue)
                } else {
                    execution::backpressure::check(&self.http, self.store.as_ref(), &self.api_uri, queue).await;
                    Instant::now() + RUNNING_RECHECK
                }
            }
            ManagerState::End => {
                self.stop_execution(executor, complete_tx, queue, "Window Closed").await;
                let _ = self.ownership_cmd.send(OwnershipCommand::ReleaseMaster).await;
                *state = ManagerState::Pre;
                Instant::now() + self.duration_pre(queue)
            }
        }
    }

    async fn forward_task_event(
        &self,
        queue: &Queue,
        executor: &RunningExecutor,
        complete_tx: &Option<mpsc::Sender<TaskId>>,
        task_id: TaskId,
        action: &str,
    ) {
        match (queue.queue_type, executor) {
            (QueueType::Sync, RunningExecutor::Sync { .. }) if action == "complete" => {
                if let Some(tx) = complete_tx {
                    let _ = tx.send(task_id).await;
                }
            }
            (QueueType::Async, RunningExecutor::Async { events_tx, .. }) => {
                let event = match action {
                    "create" => TaskEvent::Created(task_id),
                    "update" => TaskEvent::Updated(task_id),
                    "delete" => TaskEvent::Deleted(task_id),
                    _ => return,
                };
                let _ = events_tx.send(event).await;
            }
            _ => {}
        }
    }

    async fn start_execution(&self, queue: &Queue, executor: &mut RunningExecutor, complete_tx: &mut Option<mpsc::Sender<TaskId>>) {
        if !executor.is_none() {
            return;
        }
        self.set_running(queue, true);
        execution::backpressure::check(&self.http, self.store.as_ref(), &self.api_uri, queue).await;

        let cancel = CancellationToken::new();
        match queue.queue_type {
            QueueType::Sync => {
                let (tx, rx) = mpsc::channel(16);
                let exec = SyncExecutor { http: self.http.clone(), store: self.store.clone(), queue_id: self.queue_id, api_uri: self.api_uri.clone() };
                let run_cancel = cancel.clone();
                tokio::spawn(async move { exec.run(rx, run_cancel).await });
                *complete_tx = Some(tx);
                *executor = RunningExecutor::Sync { cancel };
            }
            QueueType::Async => {
                let (tx, rx) = mpsc::channel(256);
                let exec = AsyncExecutor { http: self.http.clone(), store: self.store.clone(), queue_id: self.queue_id, api_uri: self.api_uri.clone(), clock: self.clock.clone() };
                let run_cancel = cancel.clone();
                let next_end = self.next_end_time(queue);
                tokio::spawn(async move { exec.run(move || next_end, rx, run_cancel).await });
                *executor = RunningExecutor::Async { cancel, events_tx: tx };
            }
        }
    }

    async fn stop_execution(&self, executor: &mut RunningExecutor, complete_tx: &mut Option<mpsc::Sender<TaskId>>, queue: &Queue, reason: &str) {
        if executor.is_none() {
            return;
        }
        info!(queue_id = %self.queue_id, reason, "stopping execution");
        match std::mem::replace(executor, RunningExecutor::None) {
            RunningExecutor::Sync { cancel } | RunningExecutor::Async { cancel, .. } => cancel.cancel(),
            RunningExecutor::None => {}
        }
        *complete_tx = None;
        self.set_running(queue, false);
    }

    fn set_running(&self, queue: &Queue, running: bool) {
        let mut live = self.live.lock();
        live.entry(queue.id).or_insert_with(|| queue.clone()).running = running;
    }

    fn should_run(&self, queue: &Queue) -> bool {
        if queue.paths.is_empty() {
            return self.containment.should_run("/");
        }
        queue.paths.iter().all(|p| self.containment.should_run(&dirname(p)))
    }

    fn next_end_time(&self, queue: &Queue) -> Option<chrono::DateTime<chrono::Utc>> {
        queue.window.next_end_time(self.clock.now())
    }

    fn within_end_proximity(&self, queue: &Queue) -> bool {
        match self.next_end_time(queue) {
            Some(end) => end - self.clock.now() <= END_PROXIMITY,
            None => false,
        }
    }

    fn duration_pre(&self, queue: &Queue) -> StdDuration {
        let now = self.clock.now();
        let target = queue.window.next_start_time(now) - ChronoDuration::seconds(20);
        to_std_or_zero(target - now)
    }

    fn duration_start(&self, queue: &Queue) -> StdDuration {
        let now = self.clock.now();
        let next_start = queue.window.next_start_time(now);
        if next_start > now {
            to_std_or_zero(next_start - now)
        } else {
            StdDuration::from_secs(20)
        }
    }

    fn duration_end(&self, queue: &Queue) -> StdDuration {
        let now = self.clock.now();
        match self.next_end_time(queue) {
            Some(end) => to_std_or_zero(end - now),
            None => NO_END_TIMER,
        }
    }
}

fn to_std_or_zero(delta: ChronoDuration) -> StdDuration {
    delta.to_std().unwrap_or(StdDuration::ZERO)
}

#[cfg(test)]
#[path = "queue_manager_tests.rs"]
mod tests;
