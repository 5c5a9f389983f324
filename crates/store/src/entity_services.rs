// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity Services: persistence plus validation for queues/tasks/actions,
//! emitting `/updates/...` markers on every mutation. Validation rules
//! (reject a caller-supplied id on create, reject root-queue update) match
//! the reference queue-API's own checks; see DESIGN.md for the full
//! grounding ledger.

use std::sync::Arc;

use async_trait::async_trait;

use horae_core::{Queue, QueueId, QueueStatus, QueueType, Task, TaskId, TaskStatus};

use crate::dto::{ActionUpdate, NewAction, NewQueue, NewTask, QueueUpdate, TaskUpdate};
use crate::entity_store::EntityStore;
use crate::error::{Result, ValidationError};

/// Publishes a short-TTL marker to the coordination store so watchers can
/// react to a mutation without polling the persistent store.
///
/// Implemented in `horae-daemon` over a `horae-coordination::CoordinationClient`
/// — kept as a trait here so `horae-store` does not need to depend on the
/// coordination crate.
#[async_trait]
pub trait MarkerPublisher: Send + Sync + 'static {
    async fn publish(&self, key: &str, value: &str);
}

pub struct EntityServices<S, M> {
    store: Arc<S>,
    markers: Arc<M>,
}

impl<S: EntityStore, M: MarkerPublisher> EntityServices<S, M> {
    pub fn new(store: Arc<S>, markers: Arc<M>) -> Self {
        Self { store, markers }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    async fn mark(&self, kind: &str, id: impl std::fmt::Display, action: &str) {
        self.markers.publish(&format!("/updates/{kind}/{id}"), action).await;
    }

    // --- Queues ---------------------------------------------------------

    pub async fn create_queue(&self, draft: NewQueue) -> Result<Queue> {
        if draft.id.is_some() {
            return Err(ValidationError::IdSuppliedOnCreate);
        }
        let queue_type: QueueType = draft.queue_type.parse()?;
        Queue::validate_paths(&draft.paths).map_err(to_path_error)?;
        let window = horae_parser::parse(&draft.window_of_operation)?;

        let queue = Queue {
            id: QueueId::new(),
            name: draft.name,
            queue_type,
            window_of_operation: draft.window_of_operation,
            window,
            should_drain: draft.should_drain,
            paths: draft.paths,
            tags: draft.tags,
            backpressure_action: draft.backpressure_action,
            backpressure_threshold: draft.backpressure_threshold,
            status: QueueStatus::Active,
            running: false,
        };
        self.store.put_queue(queue.clone()).await;
        self.mark("queues", queue.id, "create").await;
        Ok(queue)
    }

    pub async fn update_queue(&self, id: QueueId, update: QueueUpdate) -> Result<Queue> {
        if id.is_root() {
            return Err(ValidationError::RootQueueImmutable);
        }
        let mut queue = self.store.get_queue(id).await.ok_or(ValidationError::QueueNotFound(id))?;

        if let Some(name) = update.name {
            queue.name = name;
        }
        if let Some(queue_type) = update.queue_type {
            queue.queue_type = queue_type.parse()?;
        }
        if let Some(window_of_operation) = update.window_of_operation {
            queue.window = horae_parser::parse(&window_of_operation)?;
            queue.window_of_operation = window_of_operation;
        }
        if let Some(should_drain) = update.should_drain {
            queue.should_drain = should_drain;
        }
        if let Some(paths) = update.paths {
            Queue::validate_paths(&paths).map_err(to_path_error)?;
            queue.paths = paths;
        }
        if let Some(tags) = update.tags {
            queue.tags = tags;
        }
        if update.backpressure_action.is_some() {
            queue.backpressure_action = update.backpressure_action;
        }
        if update.backpressure_threshold.is_some() {
            queue.backpressure_threshold = update.backpressure_threshold;
        }

        self.store.put_queue(queue.clone()).await;
        self.mark("queues", queue.id, "update").await;
        Ok(queue)
    }

    pub async fn delete_queue(&self, id: QueueId) -> Result<()> {
        if id.is_root() {
            return Err(ValidationError::RootQueueImmutable);
        }
        let mut queue = self.store.get_queue(id).await.ok_or(ValidationError::QueueNotFound(id))?;
        queue.status = if queue.should_drain { QueueStatus::Deleting } else { QueueStatus::Deleted };
        self.store.put_queue(queue).await;
        self.mark("queues", id, "delete").await;
        Ok(())
    }

    // --- Tasks -----------------------------------------------------------

    pub async fn create_task(&self, draft: NewTask) -> Result<Task> {
        let queue_id = draft.queue_id.unwrap_or_else(QueueId::root);
        let queue = self.store.get_queue(queue_id).await.ok_or(ValidationError::QueueNotFound(queue_id))?;
        if queue.queue_type == QueueType::Async && draft.when.is_none() {
            return Err(ValidationError::MissingWhen);
        }

        let task = Task {
            id: TaskId::new(),
            name: draft.name,
            priority: draft.priority,
            queue_id,
            when: draft.when,
            execution_action_id: draft.execution_action_id,
            promise_action_id: draft.promise_action_id,
            status: TaskStatus::Pending,
            tags: draft.tags,
        };
        self.store.put_task(task.clone()).await;
        self.mark("tasks", task.id, "create").await;
        Ok(task)
    }

    pub async fn update_task(&self, id: TaskId, update: TaskUpdate) -> Result<Task> {
        let mut task = self.store.get_task(id).await.ok_or(ValidationError::TaskNotFound(id))?;
        let queue = self.store.get_queue(task.queue_id).await.ok_or(ValidationError::QueueNotFound(task.queue_id))?;

        if let Some(name) = update.name {
            task.name = name;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if update.when.is_some() {
            task.when = update.when;
        }
        if queue.queue_type == QueueType::Async && task.when.is_none() {
            return Err(ValidationError::MissingWhen);
        }
        if update.promise_action_id.is_some() {
            task.promise_action_id = update.promise_action_id;
        }
        if let Some(tags) = update.tags {
            task.tags = tags;
        }

        self.store.put_task(task.clone()).await;
        self.mark("tasks", task.id, "update").await;
        Ok(task)
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut task = self.store.get_task(id).await.ok_or(ValidationError::TaskNotFound(id))?;
        task.status = TaskStatus::Deleted;
        self.store.put_task(task).await;
        self.mark("tasks", id, "delete").await;
        Ok(())
    }

    /// External completion callback: validates the task is `Running` and
    /// emits a `complete` marker. Does not itself mutate status — the
    /// SyncExecutor that observes the marker runs the promise action and
    /// sets the final `Complete`/`Partially Failed` status.
    pub async fn complete_task(&self, id: TaskId) -> Result<()> {
        let task = self.store.get_task(id).await.ok_or(ValidationError::TaskNotFound(id))?;
        if task.status != TaskStatus::Running {
            return Err(ValidationError::TaskNotRunning(id));
        }
        self.mark("tasks", id, "complete").await;
        Ok(())
    }

    // --- Actions -----------------------------------------------------------

    pub async fn create_action(&self, draft: NewAction) -> horae_core::Action {
        let action = horae_core::Action {
            id: horae_core::ActionId::new(),
            operation: draft.operation,
            uri: draft.uri,
            payload: draft.payload,
            status: horae_core::ActionStatus::Pending,
            failure: None,
            tags: draft.tags,
        };
        self.store.put_action(action.clone()).await;
        action
    }

    pub async fn update_action(&self, id: horae_core::ActionId, update: ActionUpdate) -> Result<horae_core::Action> {
        let mut action = self.store.get_action(id).await.ok_or(ValidationError::ActionNotFound(id))?;
        if let Some(operation) = update.operation {
            action.operation = operation;
        }
        if let Some(uri) = update.uri {
            action.uri = uri;
        }
        if update.payload.is_some() {
            action.payload = update.payload;
        }
        if let Some(tags) = update.tags {
            action.tags = tags;
        }
        self.store.put_action(action.clone()).await;
        Ok(action)
    }
}

fn to_path_error(err: horae_core::Error) -> ValidationError {
    match err {
        horae_core::Error::InvalidPath(p) => ValidationError::InvalidPath(p),
        other => ValidationError::InvalidQueueType(other),
    }
}

#[cfg(test)]
#[path = "entity_services_tests.rs"]
mod tests;
