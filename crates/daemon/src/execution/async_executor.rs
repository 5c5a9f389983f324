// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `AsyncExecutor`: a rolling 4-minute timer fan-out over `Pending` tasks
//! whose `when` falls within the current 5-minute (or window-end-bounded)
//! slice.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use horae_core::{Clock, QueueId, Task, TaskId, TaskStatus};
use horae_store::EntityStore;

use super::action::{self, ActionContext};

const QUERY_SLICE: StdDuration = StdDuration::from_secs(300);
const REQUERY_PERIOD: StdDuration = StdDuration::from_secs(240);

#[derive(Debug, Clone, Copy)]
pub enum TaskEvent {
    Created(TaskId),
    Updated(TaskId),
    Deleted(TaskId),
}

type TimerMap = Arc<Mutex<HashMap<TaskId, CancellationToken>>>;

pub struct AsyncExecutor<S, C> {
    pub http: reqwest::Client,
    pub store: Arc<S>,
    pub queue_id: QueueId,
    pub api_uri: String,
    pub clock: C,
}

impl<S: EntityStore, C: Clock> AsyncExecutor<S, C> {
    /// Runs until `cancel` fires or `events_rx` closes, re-querying on a
    /// 4-minute tick and handling individual task mutations as they arrive.
    /// `next_end` is re-evaluated on each requery to bound the query slice
    /// by the queue's current window end.
    pub async fn run(&self, next_end: impl Fn() -> Option<DateTime<Utc>>, mut events_rx: mpsc::Receiver<TaskEvent>, cancel: CancellationToken) {
        let timers: TimerMap = Arc::new(Mutex::new(HashMap::new()));
        let window = Arc::new(Mutex::new(self.clock.now()));

        self.requery_and_arm(&timers, &window, next_end()).await;

        let mut ticker = tokio::time::interval(REQUERY_PERIOD);
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    Self::cancel_all(&timers);
                    return;
                }
                _ = ticker.tick() => {
                    self.requery_and_arm(&timers, &window, next_end()).await;
                }
                event = events_rx.recv() => {
                    match event {
                        Some(TaskEvent::Created(id)) => self.handle_upsert(&timers, &window, id).await,
                        Some(TaskEvent::Updated(id)) => {
                            Self::disarm(&timers, id);
                            self.handle_upsert(&timers, &window, id).await;
                        }
                        Some(TaskEvent::Deleted(id)) => Self::disarm(&timers, id),
                        None => {
                            Self::cancel_all(&timers);
                            return;
                        }
                    }
                }
            }
        }
    }

    async fn requery_and_arm(&self, timers: &TimerMap, window: &Arc<Mutex<DateTime<Utc>>>, next_end: Option<DateTime<Utc>>) {
        let now = self.clock.now();
        let slice_end = next_end.unwrap_or(now + Duration::days(365 * 400));
        let time_for_query = now + Duration::from_std(QUERY_SLICE).unwrap_or(Duration::minutes(5));
        let time_for_query = time_for_query.min(slice_end);
        *window.lock() = time_for_query;

        let due = self.store.pending_tasks_due_by(self.queue_id, now, time_for_query).await;
        for task in due {
            if !timers.lock().contains_key(&task.id) {
                self.arm(timers, task);
            }
        }
    }

    async fn handle_upsert(&self, timers: &TimerMap, window: &Arc<Mutex<DateTime<Utc>>>, id: TaskId) {
        let Some(task) = self.store.get_task(id).await else { return };
        let cutoff = *window.lock();
        if task.when.is_some_and(|w| w <= cutoff) {
            self.arm(timers, task);
        }
    }

    fn arm(&self, timers: &TimerMap, task: Task) {
        let Some(when) = task.when else { return };
        let delay = (when - self.clock.now()).to_std().unwrap_or(StdDuration::ZERO);
        let token = CancellationToken::new();
        timers.lock().insert(task.id, token.clone());

        let http = self.http.clone();
        let store = self.store.clone();
        let api_uri = self.api_uri.clone();
        let timers = timers.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    fire(&http, store.as_ref(), task.clone(), &api_uri).await;
                    timers.lock().remove(&task.id);
                }
            }
        });
    }

    fn disarm(timers: &TimerMap, id: TaskId) {
        if let Some(token) = timers.lock().remove(&id) {
            token.cancel();
        }
    }

    fn cancel_all(timers: &TimerMap) {
        for (_, token) in timers.lock().drain() {
            token.cancel();
        }
    }
}

async fn fire<S: EntityStore>(http: &reqwest::Client, store: &S, mut task: Task, api_uri: &str) {
    task.status = TaskStatus::Running;
    store.put_task(task.clone()).await;

    let Some(action) = store.get_action(task.execution_action_id).await else { return };
    let ctx = execution_ctx(api_uri, &task, "running");
    let executed = action::execute(http, store, action, &ctx).await;

    let mut final_status = if executed.status == horae_core::ActionStatus::Complete {
        TaskStatus::Complete
    } else {
        TaskStatus::Failure
    };

    if let Some(promise_id) = task.promise_action_id {
        if let Some(promise) = store.get_action(promise_id).await {
            let ctx = execution_ctx(api_uri, &task, status_label(final_status));
            let promise_result = action::execute(http, store, promise, &ctx).await;
            if promise_result.status != horae_core::ActionStatus::Complete && final_status == TaskStatus::Complete {
                final_status = TaskStatus::PartiallyFailed;
            }
        }
    }

    task.status = final_status;
    store.put_task(task).await;
}

fn execution_ctx(api_uri: &str, task: &Task, status_label: &str) -> ActionContext {
    ActionContext {
        api_uri: api_uri.to_string(),
        completion_uri: format!("{api_uri}/v1/tasks/{}/complete", task.id),
        task_id: task.id,
        task_status: status_label.to_string(),
    }
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Complete => "complete",
        TaskStatus::Failure => "failure",
        TaskStatus::PartiallyFailed => "partially_failed",
        _ => "running",
    }
}

#[cfg(test)]
#[path = "async_executor_tests.rs"]
mod tests;
