// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory `EntityStore`, used by tests and single-node demos: plain
//! `HashMap`s behind a lock, scaled down to the three entity kinds this
//! system needs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use horae_core::{Action, ActionId, Queue, QueueId, QueueStatus, Task, TaskId, TaskStatus};

use crate::entity_store::EntityStore;

#[derive(Default)]
pub struct MemoryEntityStore {
    queues: RwLock<HashMap<QueueId, Queue>>,
    tasks: RwLock<HashMap<TaskId, Task>>,
    actions: RwLock<HashMap<ActionId, Action>>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn put_queue(&self, queue: Queue) {
        self.queues.write().insert(queue.id, queue);
    }

    async fn get_queue(&self, id: QueueId) -> Option<Queue> {
        self.queues.read().get(&id).cloned()
    }

    async fn list_active_queues(&self) -> Vec<Queue> {
        self.queues
            .read()
            .values()
            .filter(|q| q.status != QueueStatus::Deleted)
            .cloned()
            .collect()
    }

    async fn get_queue_by_path(&self, path: &str) -> Option<Queue> {
        self.queues.read().values().find(|q| q.matches_path(path)).cloned()
    }

    async fn get_queues_by_tag(&self, tag: &str) -> Vec<Queue> {
        self.queues
            .read()
            .values()
            .filter(|q| q.tags.iter().any(|t| t == tag))
            .cloned()
            .collect()
    }

    async fn put_task(&self, task: Task) {
        self.tasks.write().insert(task.id, task);
    }

    async fn get_task(&self, id: TaskId) -> Option<Task> {
        self.tasks.read().get(&id).cloned()
    }

    async fn list_tasks(&self) -> Vec<Task> {
        self.tasks.read().values().cloned().collect()
    }

    async fn list_tasks_for_queue(&self, queue_id: QueueId) -> Vec<Task> {
        self.tasks.read().values().filter(|t| t.queue_id == queue_id).cloned().collect()
    }

    async fn next_pending_task(&self, queue_id: QueueId) -> Option<Task> {
        // Lowest priority value first; ties keep `HashMap` iteration order,
        // which is not itself stable, but sync queues rarely tie in practice.
        self.tasks
            .read()
            .values()
            .filter(|t| t.queue_id == queue_id && t.status == TaskStatus::Pending)
            .min_by_key(|t| t.priority)
            .cloned()
    }

    async fn pending_tasks_due_by(&self, queue_id: QueueId, now: DateTime<Utc>, by: DateTime<Utc>) -> Vec<Task> {
        self.tasks
            .read()
            .values()
            .filter(|t| {
                t.queue_id == queue_id
                    && t.status == TaskStatus::Pending
                    && t.when.is_some_and(|w| w > now && w <= by)
            })
            .cloned()
            .collect()
    }

    async fn count_pending(&self, queue_id: QueueId) -> usize {
        self.tasks
            .read()
            .values()
            .filter(|t| t.queue_id == queue_id && t.status == TaskStatus::Pending)
            .count()
    }

    async fn get_tasks_by_tag(&self, tag: &str) -> Vec<Task> {
        self.tasks.read().values().filter(|t| t.tags.iter().any(|t2| t2 == tag)).cloned().collect()
    }

    async fn put_action(&self, action: Action) {
        self.actions.write().insert(action.id, action);
    }

    async fn get_action(&self, id: ActionId) -> Option<Action> {
        self.actions.read().get(&id).cloned()
    }

    async fn list_actions(&self) -> Vec<Action> {
        self.actions.read().values().cloned().collect()
    }

    async fn get_actions_by_tag(&self, tag: &str) -> Vec<Action> {
        self.actions.read().values().filter(|a| a.tags.iter().any(|t| t == tag)).cloned().collect()
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
