// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persistence abstraction behind Entity Services: plain maps behind
//! a lock, queried directly rather than through a query-builder, with a
//! query surface for queues/tasks covering by-tag, by-path, and priority-
//! ordered pending lookups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use horae_core::{Action, ActionId, Queue, QueueId, Task, TaskId};

#[async_trait]
pub trait EntityStore: Send + Sync + 'static {
    async fn put_queue(&self, queue: Queue);
    async fn get_queue(&self, id: QueueId) -> Option<Queue>;
    async fn list_active_queues(&self) -> Vec<Queue>;
    async fn get_queue_by_path(&self, path: &str) -> Option<Queue>;
    async fn get_queues_by_tag(&self, tag: &str) -> Vec<Queue>;

    async fn put_task(&self, task: Task);
    async fn get_task(&self, id: TaskId) -> Option<Task>;
    async fn list_tasks(&self) -> Vec<Task>;
    async fn list_tasks_for_queue(&self, queue_id: QueueId) -> Vec<Task>;
    /// The lowest-priority-value `Pending` task for a sync queue, if any.
    async fn next_pending_task(&self, queue_id: QueueId) -> Option<Task>;
    /// `Pending` async tasks for `queue_id` with `when` in `(now, by]`.
    async fn pending_tasks_due_by(&self, queue_id: QueueId, now: DateTime<Utc>, by: DateTime<Utc>) -> Vec<Task>;
    async fn count_pending(&self, queue_id: QueueId) -> usize;
    async fn get_tasks_by_tag(&self, tag: &str) -> Vec<Task>;

    async fn put_action(&self, action: Action);
    async fn get_action(&self, id: ActionId) -> Option<Action>;
    async fn list_actions(&self) -> Vec<Action>;
    async fn get_actions_by_tag(&self, tag: &str) -> Vec<Action>;
}
