// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `SyncExecutor`: a single-slot FIFO-by-priority loop. At most one task
//! per queue is ever in flight; the next task is not dispatched until the
//! previous one either fails outright or receives an external `complete`
//! signal routed from the API through the Queue-Ownership Monitor.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use horae_core::{ActionStatus, QueueId, Task, TaskId, TaskStatus};
use horae_store::EntityStore;

use super::action::{self, ActionContext};

const RETRY_DELAY: Duration = Duration::from_secs(15);

pub struct SyncExecutor<S> {
    pub http: reqwest::Client,
    pub store: Arc<S>,
    pub queue_id: QueueId,
    pub api_uri: String,
}

impl<S: EntityStore> SyncExecutor<S> {
    /// Runs until `cancel` fires. `complete_rx` delivers the id of a task
    /// whose completion callback the API received; entries for other task
    /// ids are ignored (a stale signal from a task this slot already moved
    /// past).
    pub async fn run(&self, mut complete_rx: mpsc::Receiver<TaskId>, cancel: CancellationToken) {
        loop {
            let Some(mut task) = self.store.next_pending_task(self.queue_id).await else {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(RETRY_DELAY) => continue,
                }
            };

            task.status = TaskStatus::Running;
            self.store.put_task(task.clone()).await;

            let Some(action) = self.store.get_action(task.execution_action_id).await else {
                task.status = TaskStatus::Failure;
                self.store.put_task(task).await;
                continue;
            };
            let ctx = self.ctx_for(&task, "running");
            let executed = action::execute(&self.http, self.store.as_ref(), action, &ctx).await;

            if executed.status == ActionStatus::Complete {
                let completed = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    signal = Self::wait_for_completion(&mut complete_rx, task.id) => signal,
                };
                if !completed {
                    return;
                }
                let promise_ok = self.run_promise(&task, "complete").await;
                task.status = if promise_ok { TaskStatus::Complete } else { TaskStatus::PartiallyFailed };
                self.store.put_task(task).await;
            } else {
                task.status = TaskStatus::Failure;
                self.store.put_task(task.clone()).await;
                self.run_promise(&task, "failure").await;
            }
        }
    }

    async fn wait_for_completion(complete_rx: &mut mpsc::Receiver<TaskId>, task_id: TaskId) -> bool {
        loop {
            match complete_rx.recv().await {
                Some(id) if id == task_id => return true,
                Some(_) => continue,
                None => return false,
            }
        }
    }

    /// Runs the task's promise action, if any. Returns `true` when there
    /// was no promise or it completed successfully.
    async fn run_promise(&self, task: &Task, status_label: &str) -> bool {
        let Some(promise_id) = task.promise_action_id else { return true };
        let Some(promise) = self.store.get_action(promise_id).await else { return true };
        let ctx = self.ctx_for(task, status_label);
        let executed = action::execute(&self.http, self.store.as_ref(), promise, &ctx).await;
        executed.status == ActionStatus::Complete
    }

    fn ctx_for(&self, task: &Task, status_label: &str) -> ActionContext {
        ActionContext {
            api_uri: self.api_uri.clone(),
            completion_uri: format!("{}/v1/tasks/{}/complete", self.api_uri, task.id),
            task_id: task.id,
            task_status: status_label.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "sync_executor_tests.rs"]
mod tests;
